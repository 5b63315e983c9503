use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::{PlayerSort, Tab, TabView};
use crate::view::SortOrder;

#[derive(Debug, Serialize)]
pub struct TabSummary {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TabsResponse {
    pub tabs: Vec<TabSummary>,
}

pub async fn list_tabs() -> Json<TabsResponse> {
    Json(TabsResponse {
        tabs: Tab::ALL
            .iter()
            .map(|t| TabSummary {
                id: t.id(),
                label: t.label(),
            })
            .collect(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TabParams {
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

pub async fn tab_view(
    State(state): State<AppState>,
    Path(tab_id): Path<String>,
    Query(params): Query<TabParams>,
) -> Result<Json<TabView>, ApiError> {
    let tab: Tab = tab_id.parse().map_err(ApiError::NotFound)?;

    if tab != Tab::AllPlayers && (params.sort.is_some() || params.order.is_some()) {
        return Err(ApiError::BadRequest(format!(
            "Tab {} does not support sorting",
            tab
        )));
    }

    let sort = PlayerSort {
        column: params.sort.filter(|s| !s.is_empty()),
        order: params.order,
    };
    Ok(Json(state.dashboard().tab(tab, &sort)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get_json, setup_test_state, write_json};
    use crate::api::build_router;
    use axum::http::StatusCode;
    use serde_json::json;

    fn write_fixtures(dir: &std::path::Path) {
        write_json(
            dir,
            "Summary",
            json!([
                {"Metric": "Total Players", "Value": 40},
                {"Metric": "Total Matches", "Value": 20},
                {"Metric": "Total Rounds Played", "Value": 460},
                {"Metric": "Total Kills", "Value": 6120}
            ]),
        );
        write_json(
            dir,
            "All_Players",
            json!([
                {"Player": "Alice", "Kills": 20, "Deaths": 10, "First Kills": 8,
                 "First Deaths": 3, "Win %": 60, "ACS": 240, "Weighted Clutches": 3,
                 "Matches": 10},
                {"Player": "Bob", "Kills": 50, "Deaths": 10, "Matches": 4}
            ]),
        );
        write_json(
            dir,
            "Clutch_Masters",
            json!([
                {"Player": "Alice", "Main Agent": "Jett", "Total Clutches": 3,
                 "Clutch Attempts": 7, "Clutch %": 42.9, "1v2": 2, "1v3": 1}
            ]),
        );
    }

    #[tokio::test]
    async fn test_list_tabs() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs").await;

        assert_eq!(status, StatusCode::OK);
        let tabs = json["tabs"].as_array().unwrap();
        assert_eq!(tabs.len(), 8);
        assert_eq!(tabs[0]["id"], "summary");
        assert_eq!(tabs[7]["label"], "MVP Rankings");
    }

    #[tokio::test]
    async fn test_summary_tab() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixtures(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "summary");
        assert_eq!(json["tiles"][2]["label"], "Total Rounds");
        assert_eq!(json["tiles"][2]["value"], 460);
        assert_eq!(json["tiles"][3]["value"], 6120);
    }

    #[tokio::test]
    async fn test_all_players_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixtures(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) =
            get_json(app, "/api/tabs/all-players?sort=Kills&order=asc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tables"][0]["rows"][0]["Player"], "Alice");
        assert_eq!(json["sortable_columns"][0], "Player");
    }

    #[tokio::test]
    async fn test_clutch_tab() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixtures(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/clutch-analysis").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["tables"][0]["rows"][0].get("Main Agent").is_none());
        assert_eq!(json["distribution"], json!({"1v2": 2.0, "1v3": 1.0}));
    }

    #[tokio::test]
    async fn test_mvp_tab() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixtures(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/mvp-rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["impact"]["ranked"][0]["player"], "Alice");
        let rating = json["impact"]["ranked"][0]["impact_rating"].as_f64().unwrap();
        assert!((rating - 4.5).abs() < 1e-9);
        assert_eq!(json["impact"]["ineligible"][0]["player"], "Bob");
    }

    #[tokio::test]
    async fn test_unknown_tab() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/scoreboard").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_sort_rejected_on_fixed_tab() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/economy?sort=Player").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_tabs_render_without_data() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/tabs/leaderboards").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tables"].as_array().unwrap().len(), 5);
        assert_eq!(json["tables"][0]["rows"], json!([]));
    }
}
