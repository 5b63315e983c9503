use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub datasets: usize,
    pub populated_datasets: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.registry.info();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        datasets: info.len(),
        populated_datasets: info.iter().filter(|d| d.records > 0).count(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get_json, setup_test_state, write_json};
    use crate::api::build_router;
    use crate::models::SourceFile;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        write_json(tmp.path(), "Summary", json!([{"Metric": "Total Kills", "Value": 1}]));
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["datasets"], SourceFile::ALL.len());
        assert_eq!(json["populated_datasets"], 1);
    }
}
