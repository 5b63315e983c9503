//! Statistics calculation engine.
//!
//! Derives the Impact Rating from per-player rows:
//! - K/D ratio
//! - Opening duel impact (first kills minus first deaths)
//! - Win contribution and combat score, scaled to comparable ranges
//! - Clutch factor, weighted by how outnumbered the player was
//!
//! Ratings are recomputed from the dataset on every call and never stored.

use serde::Serialize;

use crate::models::{Dataset, PlayerStatRecord, Record};

/// Players with fewer matches than this are not rated.
pub const MIN_MATCHES: f64 = 6.0;

const OPENING_WEIGHT: f64 = 0.2;
const WIN_RATE_SCALE: f64 = 100.0;
const ACS_SCALE: f64 = 300.0;
const CLUTCH_SCALE: f64 = 3.0;

/// Result of rating one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "rating", rename_all = "snake_case")]
pub enum ImpactRating {
    Rated(f64),
    /// Too few matches played to be compared with others.
    Ineligible,
}

impl ImpactRating {
    pub fn value(&self) -> Option<f64> {
        match self {
            ImpactRating::Rated(v) => Some(*v),
            ImpactRating::Ineligible => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, ImpactRating::Rated(_))
    }
}

/// The five impact components and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactBreakdown {
    pub kd: f64,
    pub opening_impact: f64,
    pub win_contribution: f64,
    pub combat_contribution: f64,
    pub clutch_factor: f64,
    pub total: f64,
}

/// Kills per death; zero when there are no deaths.
pub fn calculate_kd(kills: f64, deaths: f64) -> f64 {
    if deaths == 0.0 {
        0.0
    } else {
        kills / deaths
    }
}

/// Break a player's impact rating into its components.
///
/// Returns `None` when the player is below [`MIN_MATCHES`] or has no match
/// count. A component whose inputs are missing contributes 0.
pub fn impact_breakdown(stats: &PlayerStatRecord) -> Option<ImpactBreakdown> {
    let matches = stats.matches_played.filter(|m| *m >= MIN_MATCHES)?;

    let kd = match (stats.kills, stats.deaths) {
        (Some(k), Some(d)) => calculate_kd(k, d),
        _ => 0.0,
    };
    let opening_impact = match (stats.first_kills, stats.first_deaths) {
        (Some(fk), Some(fd)) => (fk - fd) * OPENING_WEIGHT,
        _ => 0.0,
    };
    let win_contribution = stats.win_rate_percent.map_or(0.0, |w| w / WIN_RATE_SCALE);
    let combat_contribution = stats.acs.map_or(0.0, |acs| acs / ACS_SCALE);
    let clutch_factor = stats
        .weighted_clutch_score
        .map_or(0.0, |score| (score / matches) / CLUTCH_SCALE);

    Some(ImpactBreakdown {
        kd,
        opening_impact,
        win_contribution,
        combat_contribution,
        clutch_factor,
        total: kd + opening_impact + win_contribution + combat_contribution + clutch_factor,
    })
}

/// Impact rating of one player row.
pub fn compute_impact_rating(record: &Record) -> ImpactRating {
    impact_breakdown(&PlayerStatRecord::from_record(record))
        .map_or(ImpactRating::Ineligible, |b| ImpactRating::Rated(b.total))
}

/// A rated player and their position.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub player: Option<String>,
    pub matches: f64,
    pub impact_rating: f64,
    pub breakdown: ImpactBreakdown,
}

/// A player shown without a rank.
#[derive(Debug, Clone, Serialize)]
pub struct UnrankedPlayer {
    pub player: Option<String>,
    pub matches: Option<f64>,
}

/// Impact ratings for a whole dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImpactRanking {
    pub min_matches: f64,
    pub ranked: Vec<RankedPlayer>,
    pub ineligible: Vec<UnrankedPlayer>,
}

/// Rate every player in `dataset` and rank the eligible ones.
///
/// Ranked players are ordered by rating, highest first; ties keep dataset
/// order. Ineligible players are listed separately in dataset order.
pub fn rank_by_impact(dataset: &Dataset) -> ImpactRanking {
    let mut rated = Vec::new();
    let mut ineligible = Vec::new();

    for record in dataset {
        let stats = PlayerStatRecord::from_record(record);
        match (impact_breakdown(&stats), stats.matches_played) {
            (Some(breakdown), Some(matches)) => rated.push((stats.player, matches, breakdown)),
            _ => ineligible.push(UnrankedPlayer {
                player: stats.player,
                matches: stats.matches_played,
            }),
        }
    }

    rated.sort_by(|a, b| b.2.total.total_cmp(&a.2.total));

    let ranked = rated
        .into_iter()
        .enumerate()
        .map(|(i, (player, matches, breakdown))| RankedPlayer {
            rank: i + 1,
            player,
            matches,
            impact_rating: breakdown.total,
            breakdown,
        })
        .collect();

    ImpactRanking {
        min_matches: MIN_MATCHES,
        ranked,
        ineligible,
    }
}

/// How the impact rating is put together, for display next to rankings.
pub const IMPACT_RATING_EXPLANATION: &str = "\
Impact Rating is a normalized composite metric measuring overall player contribution.

Formula: K/D + (FK - FD) x 0.2 + (Win% / 100) + (ACS / 300) + Clutch Factor

- K/D ratio: combat efficiency (0.5-2.5 typical)
- (FK - FD) x 0.2: opening duel impact
- Win rate / 100: contribution to team success (0.0-1.0)
- ACS / 300: average combat score, 300+ is extraordinary
- Clutch factor: (weighted clutches / matches) / 3, where 1v2 = 1 point, \
1v3 = 2 points, 1v4 = 3 points, 1v5 = 4 points

Minimum 6 matches required for a rating.";
