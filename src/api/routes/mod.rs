//! Route handlers, one module per resource.

pub mod datasets;
pub mod health;
pub mod impact;
pub mod tabs;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::state::AppState;
    use crate::config::AppConfig;
    use crate::registry::DatasetRegistry;
    use crate::storage::StorageConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    pub fn write_json(dir: &std::path::Path, name: &str, value: Value) {
        std::fs::write(dir.join(format!("{}.json", name)), value.to_string()).unwrap();
    }

    pub fn setup_test_state(dir: &std::path::Path) -> AppState {
        let storage = StorageConfig::new(dir.to_path_buf());
        let config = AppConfig {
            data_dir: dir.to_path_buf(),
            ..AppConfig::default()
        };
        AppState::new(DatasetRegistry::from_storage(&storage), config)
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}
