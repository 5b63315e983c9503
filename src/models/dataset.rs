//! Named, immutable datasets.

use serde::Serialize;

use super::Record;

/// Source files the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFile {
    Summary,
    AllPlayers,
    KdLeaders,
    DamageLeaders,
    TopKillers,
    HeadshotLeaders,
    FirstKillsLeaders,
    ClutchMasters,
    EconomyLeaders,
    WinRateLeaders,
    AbilityUsage,
    AgentMeta,
    MvpRankings,
}

impl SourceFile {
    pub const ALL: [SourceFile; 13] = [
        SourceFile::Summary,
        SourceFile::AllPlayers,
        SourceFile::KdLeaders,
        SourceFile::DamageLeaders,
        SourceFile::TopKillers,
        SourceFile::HeadshotLeaders,
        SourceFile::FirstKillsLeaders,
        SourceFile::ClutchMasters,
        SourceFile::EconomyLeaders,
        SourceFile::WinRateLeaders,
        SourceFile::AbilityUsage,
        SourceFile::AgentMeta,
        SourceFile::MvpRankings,
    ];

    /// Dataset name, which is also the file stem.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFile::Summary => "Summary",
            SourceFile::AllPlayers => "All_Players",
            SourceFile::KdLeaders => "KD_Leaders",
            SourceFile::DamageLeaders => "Damage_Leaders",
            SourceFile::TopKillers => "Top_Killers",
            SourceFile::HeadshotLeaders => "Headshot_Leaders",
            SourceFile::FirstKillsLeaders => "First_Kills_Leaders",
            SourceFile::ClutchMasters => "Clutch_Masters",
            SourceFile::EconomyLeaders => "Economy_Leaders",
            SourceFile::WinRateLeaders => "Win_Rate_Leaders",
            SourceFile::AbilityUsage => "Ability_Usage",
            SourceFile::AgentMeta => "Agent_Meta",
            SourceFile::MvpRankings => "MVP_Rankings",
        }
    }

    pub fn filename(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered sequence of records loaded from one named source.
///
/// Records keep their source order. A dataset is never modified after
/// construction; views copy out of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_names() {
        assert_eq!(SourceFile::AllPlayers.name(), "All_Players");
        assert_eq!(SourceFile::MvpRankings.filename(), "MVP_Rankings.json");
        assert_eq!(SourceFile::FirstKillsLeaders.to_string(), "First_Kills_Leaders");
    }

    #[test]
    fn test_source_files_are_unique() {
        let mut names: Vec<&str> = SourceFile::ALL.iter().map(|s| s.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SourceFile::ALL.len());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty("Summary");
        assert_eq!(dataset.name(), "Summary");
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter().count(), 0);
    }
}
