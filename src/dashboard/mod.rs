//! Dashboard tabs.
//!
//! Assembles the eight dashboard tabs from registry datasets. Each tab is a
//! set of ordered tables plus, for some tabs, headline metrics, a column
//! summary or impact ratings.

use std::str::FromStr;

use serde::Serialize;

use crate::aggregate::{clutch_distribution_columns, sum_columns, ColumnSums};
use crate::calculate::{rank_by_impact, ImpactRanking, IMPACT_RATING_EXPLANATION};
use crate::config::DashboardConfig;
use crate::models::{Dataset, SourceFile};
use crate::registry::DatasetRegistry;
use crate::view::{columns, view, SortOrder, ViewOptions};

/// Summary tiles: label shown and the `Metric` row it reads.
const SUMMARY_TILES: [(&str, &str); 4] = [
    ("Total Players", "Total Players"),
    ("Total Matches", "Total Matches"),
    ("Total Rounds", "Total Rounds Played"),
    ("Total Kills", "Total Kills"),
];

/// Leaderboard sections, in display order.
const LEADERBOARDS: [(&str, SourceFile); 5] = [
    ("K/D", SourceFile::KdLeaders),
    ("Damage", SourceFile::DamageLeaders),
    ("Top Killers", SourceFile::TopKillers),
    ("Headshots", SourceFile::HeadshotLeaders),
    ("First Kills", SourceFile::FirstKillsLeaders),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Summary,
    AllPlayers,
    AgentMeta,
    Leaderboards,
    ClutchAnalysis,
    Economy,
    AbilityUsage,
    MvpRankings,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Summary,
        Tab::AllPlayers,
        Tab::AgentMeta,
        Tab::Leaderboards,
        Tab::ClutchAnalysis,
        Tab::Economy,
        Tab::AbilityUsage,
        Tab::MvpRankings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Summary => "summary",
            Tab::AllPlayers => "all-players",
            Tab::AgentMeta => "agent-meta",
            Tab::Leaderboards => "leaderboards",
            Tab::ClutchAnalysis => "clutch-analysis",
            Tab::Economy => "economy",
            Tab::AbilityUsage => "ability-usage",
            Tab::MvpRankings => "mvp-rankings",
        }
    }

    /// Label on the tab strip.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::AllPlayers => "All Players",
            Tab::AgentMeta => "Agent Meta",
            Tab::Leaderboards => "Leaderboards",
            Tab::ClutchAnalysis => "Clutch Analysis",
            Tab::Economy => "Economy",
            Tab::AbilityUsage => "Ability Usage",
            Tab::MvpRankings => "MVP Rankings",
        }
    }

    /// Heading shown inside the tab.
    pub fn header(&self) -> &'static str {
        match self {
            Tab::Summary => "Tournament Summary",
            Tab::AllPlayers => "All Players Statistics",
            Tab::AgentMeta => "Agent Meta Analysis",
            Tab::Leaderboards => "Leaderboards",
            Tab::ClutchAnalysis => "Clutch Analysis",
            Tab::Economy => "Economy Analysis",
            Tab::AbilityUsage => "Ability Usage",
            Tab::MvpRankings => "MVP Rankings",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Tab::ALL
            .into_iter()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| format!("Unknown tab: {}", s))
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: i64,
}

/// An ordered table ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub title: String,
    pub dataset: String,
    pub columns: Vec<String>,
    pub rows: Vec<crate::models::Record>,
}

impl Table {
    pub fn from_view(title: impl Into<String>, dataset: &Dataset, options: &ViewOptions) -> Self {
        let rows = view(dataset, options);
        Self {
            title: title.into(),
            dataset: dataset.name().to_string(),
            columns: columns(&rows),
            rows,
        }
    }
}

/// Everything one tab displays.
#[derive(Debug, Clone, Serialize)]
pub struct TabView {
    pub id: Tab,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<MetricTile>,
    pub tables: Vec<Table>,
    /// Columns the table can be sorted by
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sortable_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<ColumnSums>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactRanking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TabView {
    fn new(tab: Tab) -> Self {
        Self {
            id: tab,
            title: tab.header().to_string(),
            tiles: Vec::new(),
            tables: Vec::new(),
            sortable_columns: Vec::new(),
            distribution: None,
            impact: None,
            notes: None,
        }
    }
}

/// Sorting requested for the All Players tab.
#[derive(Debug, Clone, Default)]
pub struct PlayerSort {
    /// Defaults to the first column
    pub column: Option<String>,
    /// Defaults to descending
    pub order: Option<SortOrder>,
}

/// Builds tab views from a registry.
pub struct Dashboard<'a> {
    registry: &'a DatasetRegistry,
    settings: DashboardConfig,
}

impl<'a> Dashboard<'a> {
    pub fn new(registry: &'a DatasetRegistry, settings: DashboardConfig) -> Self {
        Self { registry, settings }
    }

    pub fn tab(&self, tab: Tab, sort: &PlayerSort) -> TabView {
        match tab {
            Tab::Summary => self.summary(),
            Tab::AllPlayers => self.all_players(sort),
            Tab::AgentMeta => self.single_table(tab, SourceFile::AgentMeta),
            Tab::Leaderboards => self.leaderboards(),
            Tab::ClutchAnalysis => self.clutch_analysis(),
            Tab::Economy => self.single_table(tab, SourceFile::EconomyLeaders),
            Tab::AbilityUsage => self.single_table(tab, SourceFile::AbilityUsage),
            Tab::MvpRankings => self.mvp_rankings(),
        }
    }

    pub fn summary(&self) -> TabView {
        let dataset = self.registry.source(SourceFile::Summary);
        let mut tab = TabView::new(Tab::Summary);
        tab.tiles = SUMMARY_TILES
            .iter()
            .map(|(label, metric)| MetricTile {
                label: label.to_string(),
                value: summary_metric(&dataset, metric),
            })
            .collect();
        tab.tables
            .push(Table::from_view("All Summary Metrics", &dataset, &ViewOptions::new()));
        tab
    }

    pub fn all_players(&self, sort: &PlayerSort) -> TabView {
        let dataset = self.registry.source(SourceFile::AllPlayers);
        let sortable = columns(dataset.records());

        let mut options = ViewOptions::new();
        if let Some(column) = sort.column.clone().or_else(|| sortable.first().cloned()) {
            options = options.sort_by(column, sort.order.unwrap_or(SortOrder::Descending));
        }

        let mut tab = TabView::new(Tab::AllPlayers);
        tab.tables
            .push(Table::from_view("All Players", &dataset, &options));
        tab.sortable_columns = sortable;
        tab
    }

    pub fn leaderboards(&self) -> TabView {
        let options = ViewOptions::new().limit(self.settings.leaderboard_limit);
        let mut tab = TabView::new(Tab::Leaderboards);
        tab.tables = LEADERBOARDS
            .iter()
            .map(|(title, source)| {
                Table::from_view(*title, &self.registry.source(*source), &options)
            })
            .collect();
        tab
    }

    pub fn clutch_analysis(&self) -> TabView {
        let dataset = self.registry.source(SourceFile::ClutchMasters);
        let table = Table::from_view(
            "Clutch Statistics",
            &dataset,
            &ViewOptions::new().exclude(["Main Agent"]),
        );
        let distribution_columns = clutch_distribution_columns(&table.rows);

        let mut tab = TabView::new(Tab::ClutchAnalysis);
        if !distribution_columns.is_empty() {
            tab.distribution = Some(sum_columns(&dataset, distribution_columns.as_slice()));
        }
        tab.tables.push(table);
        tab
    }

    pub fn mvp_rankings(&self) -> TabView {
        let rankings = self.registry.source(SourceFile::MvpRankings);
        let players = self.registry.source(SourceFile::AllPlayers);

        let mut tab = TabView::new(Tab::MvpRankings);
        tab.tables
            .push(Table::from_view("MVP Rankings", &rankings, &ViewOptions::new()));
        tab.impact = Some(rank_by_impact(&players));
        tab.notes = Some(IMPACT_RATING_EXPLANATION.to_string());
        tab
    }

    fn single_table(&self, tab: Tab, source: SourceFile) -> TabView {
        let dataset = self.registry.source(source);
        let mut view = TabView::new(tab);
        view.tables
            .push(Table::from_view(tab.label(), &dataset, &ViewOptions::new()));
        view
    }
}

/// Value of the `Metric` row named `metric`, truncated to an integer;
/// 0 when the row or its value is missing.
pub fn summary_metric(dataset: &Dataset, metric: &str) -> i64 {
    dataset
        .iter()
        .find(|r| r.text("Metric") == Some(metric))
        .and_then(|r| r.number("Value"))
        .map_or(0, |v| v.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> DatasetRegistry {
        let registry = DatasetRegistry::new();
        registry.load(
            "Summary",
            &json!([
                {"Metric": "Total Players", "Value": 50},
                {"Metric": "Total Matches", "Value": 24},
                {"Metric": "Total Rounds Played", "Value": 530.0},
                {"Metric": "Avg Kills per Round", "Value": 0.7}
            ]),
        );
        registry.load(
            "All_Players",
            &json!([
                {"Player": "Alice", "Kills": 20, "Deaths": 10, "Win %": 60, "Matches": 10},
                {"Player": "Bob", "Kills": 35, "Deaths": 20, "Win %": 40, "Matches": 3},
                {"Player": "Cara", "Kills": 28, "Deaths": 14, "Win %": 75, "Matches": 8}
            ]),
        );
        registry.load(
            "Clutch_Masters",
            &json!([
                {"Player": "Alice", "Main Agent": "Jett", "Total Clutches": 3,
                 "Clutch Attempts": 9, "Clutch %": 33.3, "1v2": 2, "1v3": 1},
                {"Player": "Cara", "Main Agent": "Sova", "Total Clutches": 1,
                 "Clutch Attempts": 4, "Clutch %": 25.0, "1v2": 0, "1v3": 1}
            ]),
        );
        registry.load(
            "Top_Killers",
            &json!([
                {"Player": "Bob", "Kills": 35},
                {"Player": "Cara", "Kills": 28},
                {"Player": "Alice", "Kills": 20}
            ]),
        );
        registry
    }

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(tab.id().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!("All_Players".parse::<Tab>().unwrap(), Tab::AllPlayers);
        assert!("scoreboard".parse::<Tab>().is_err());
    }

    #[test]
    fn test_summary_tiles_default_to_zero() {
        let registry = registry();
        let tab = Dashboard::new(&registry, DashboardConfig::default()).summary();

        let values: Vec<i64> = tab.tiles.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![50, 24, 530, 0]);
        assert_eq!(tab.tiles[2].label, "Total Rounds");
        assert_eq!(tab.tables[0].rows.len(), 4);
    }

    #[test]
    fn test_all_players_default_sort() {
        let registry = registry();
        let dashboard = Dashboard::new(&registry, DashboardConfig::default());

        // First column is Player, descending
        let tab = dashboard.all_players(&PlayerSort::default());
        let order: Vec<&str> = tab.tables[0]
            .rows
            .iter()
            .filter_map(|r| r.text("Player"))
            .collect();
        assert_eq!(order, vec!["Cara", "Bob", "Alice"]);
        assert_eq!(tab.sortable_columns, vec!["Player", "Kills", "Deaths", "Win %", "Matches"]);
    }

    #[test]
    fn test_all_players_custom_sort() {
        let registry = registry();
        let dashboard = Dashboard::new(&registry, DashboardConfig::default());
        let sort = PlayerSort {
            column: Some("Kills".to_string()),
            order: Some(SortOrder::Ascending),
        };

        let tab = dashboard.all_players(&sort);
        let order: Vec<&str> = tab.tables[0]
            .rows
            .iter()
            .filter_map(|r| r.text("Player"))
            .collect();
        assert_eq!(order, vec!["Alice", "Cara", "Bob"]);
    }

    #[test]
    fn test_leaderboards_respect_limit() {
        let registry = registry();
        let settings = DashboardConfig {
            leaderboard_limit: Some(2),
        };
        let tab = Dashboard::new(&registry, settings).leaderboards();

        let titles: Vec<&str> = tab.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["K/D", "Damage", "Top Killers", "Headshots", "First Kills"]);
        assert_eq!(tab.tables[2].rows.len(), 2);
        assert!(tab.tables[0].rows.is_empty());
    }

    #[test]
    fn test_clutch_analysis() {
        let registry = registry();
        let tab = Dashboard::new(&registry, DashboardConfig::default()).clutch_analysis();

        let table = &tab.tables[0];
        assert!(!table.columns.contains(&"Main Agent".to_string()));
        assert_eq!(table.columns[0], "Player");

        let distribution = tab.distribution.unwrap();
        let entries: Vec<(&str, f64)> = distribution.iter().collect();
        assert_eq!(entries, vec![("1v2", 2.0), ("1v3", 2.0)]);
    }

    #[test]
    fn test_clutch_analysis_without_situation_columns() {
        let registry = DatasetRegistry::new();
        registry.load(
            "Clutch_Masters",
            &json!([{"Player": "A", "Main Agent": "Jett", "Total Clutches": 1}]),
        );
        let tab = Dashboard::new(&registry, DashboardConfig::default()).clutch_analysis();
        assert!(tab.distribution.is_none());
    }

    #[test]
    fn test_mvp_rankings() {
        let registry = registry();
        let tab = Dashboard::new(&registry, DashboardConfig::default()).mvp_rankings();

        let impact = tab.impact.unwrap();
        let ranked: Vec<&str> = impact
            .ranked
            .iter()
            .filter_map(|p| p.player.as_deref())
            .collect();
        // Cara: 2.0 + 0.75, Alice: 2.0 + 0.6; Bob has too few matches
        assert_eq!(ranked, vec!["Cara", "Alice"]);
        assert_eq!(impact.ineligible[0].player.as_deref(), Some("Bob"));
        assert!(tab.notes.unwrap().contains("Minimum 6 matches"));
    }

    #[test]
    fn test_every_tab_renders_on_empty_registry() {
        let registry = DatasetRegistry::new();
        let dashboard = Dashboard::new(&registry, DashboardConfig::default());

        for tab in Tab::ALL {
            let view = dashboard.tab(tab, &PlayerSort::default());
            assert_eq!(view.id, tab);
            assert!(view.tables.iter().all(|t| t.rows.is_empty()));
        }
    }
}
