//! Per-player statistics extracted from a schema-less record.

use serde::Serialize;

use super::Record;

const PLAYER: &[&str] = &["Player"];
const KILLS: &[&str] = &["Kills", "K"];
const DEATHS: &[&str] = &["Deaths", "D"];
const FIRST_KILLS: &[&str] = &["First Kills", "FK"];
const FIRST_DEATHS: &[&str] = &["First Deaths", "FD"];
const WIN_RATE: &[&str] = &["Win %", "Win Rate", "Win%"];
const ACS: &[&str] = &["ACS", "Avg ACS"];
const WEIGHTED_CLUTCHES: &[&str] = &["Weighted Clutches", "Weighted Clutch Score"];
const MATCHES: &[&str] = &["Matches", "Matches Played", "Games"];

/// Clutch situation columns and the points a win in each is worth.
pub const CLUTCH_SITUATIONS: [(&str, f64); 4] = [("1v2", 1.0), ("1v3", 2.0), ("1v4", 3.0), ("1v5", 4.0)];

/// The fields of a player row that feed the impact rating.
///
/// Every field is optional; absent or non-numeric cells stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStatRecord {
    pub player: Option<String>,
    pub kills: Option<f64>,
    pub deaths: Option<f64>,
    pub first_kills: Option<f64>,
    pub first_deaths: Option<f64>,
    /// Win rate on a 0-100 scale
    pub win_rate_percent: Option<f64>,
    pub acs: Option<f64>,
    pub weighted_clutch_score: Option<f64>,
    pub matches_played: Option<f64>,
}

impl PlayerStatRecord {
    pub fn from_record(record: &Record) -> Self {
        Self {
            player: PLAYER
                .iter()
                .find_map(|c| record.get(c).as_str().map(str::to_string)),
            kills: record.number_any(KILLS),
            deaths: record.number_any(DEATHS),
            first_kills: record.number_any(FIRST_KILLS),
            first_deaths: record.number_any(FIRST_DEATHS),
            win_rate_percent: record.number_any(WIN_RATE),
            acs: record.number_any(ACS),
            weighted_clutch_score: record
                .number_any(WEIGHTED_CLUTCHES)
                .or_else(|| weighted_clutch_score(record)),
            matches_played: record.number_any(MATCHES),
        }
    }
}

/// Weighted clutch score from per-situation clutch win counts.
///
/// A 1vN win is worth N-1 points. Returns `None` when the record has none
/// of the situation columns.
pub fn weighted_clutch_score(record: &Record) -> Option<f64> {
    let mut seen = false;
    let mut score = 0.0;
    for (column, points) in CLUTCH_SITUATIONS {
        if let Some(count) = record.number(column) {
            seen = true;
            score += count * points;
        }
    }
    seen.then_some(score)
}
