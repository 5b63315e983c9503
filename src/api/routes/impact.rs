use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::calculate::{rank_by_impact, ImpactRanking};
use crate::models::SourceFile;

#[derive(Debug, Deserialize)]
pub struct ImpactParams {
    /// Dataset to rate; defaults to `All_Players`
    pub dataset: Option<String>,
}

pub async fn impact_rankings(
    State(state): State<AppState>,
    Query(params): Query<ImpactParams>,
) -> Json<ImpactRanking> {
    let name = params
        .dataset
        .unwrap_or_else(|| SourceFile::AllPlayers.name().to_string());
    let dataset = state.registry.get(&name);
    Json(rank_by_impact(&dataset))
}
