use std::sync::Arc;

use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::registry::DatasetRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DatasetRegistry>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(registry: DatasetRegistry, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.registry, self.config.dashboard.clone())
    }
}
