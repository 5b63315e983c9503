use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::parse_column_list;
use crate::api::state::AppState;
use crate::models::Record;
use crate::registry::DatasetInfo;
use crate::view::{columns, view, SortOrder, ViewOptions};

#[derive(Debug, Serialize)]
pub struct DatasetsResponse {
    pub datasets: Vec<DatasetInfo>,
}

pub async fn list_datasets(State(state): State<AppState>) -> Json<DatasetsResponse> {
    Json(DatasetsResponse {
        datasets: state.registry.info(),
    })
}

#[derive(Debug, Deserialize)]
pub struct DatasetViewParams {
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    /// Comma-separated columns to drop
    pub exclude: Option<String>,
    /// Comma-separated columns to keep
    pub include: Option<String>,
    pub limit: Option<usize>,
}

impl DatasetViewParams {
    pub fn to_options(&self) -> ViewOptions {
        let mut options = ViewOptions::new()
            .exclude(parse_column_list(self.exclude.as_deref()))
            .include(parse_column_list(self.include.as_deref()))
            .limit(self.limit);
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            options = options.sort_by(sort, self.order.unwrap_or_default());
        }
        options
    }
}

#[derive(Debug, Serialize)]
pub struct DatasetViewResponse {
    pub name: String,
    /// Whether the dataset is registered at all
    pub found: bool,
    pub total_records: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

/// A sorted/projected view of any dataset. Unknown datasets come back
/// empty rather than as an error.
pub async fn dataset_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<DatasetViewParams>,
) -> Json<DatasetViewResponse> {
    let dataset = state.registry.get(&name);
    let rows = view(&dataset, &params.to_options());

    Json(DatasetViewResponse {
        found: state.registry.contains(&name),
        total_records: dataset.len(),
        columns: columns(&rows),
        rows,
        name,
    })
}
