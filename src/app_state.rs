use std::sync::Arc;

use crate::{config::AppConfig, source::CatalogSource};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<CatalogSource>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let catalog = Arc::new(CatalogSource::new(
            config.csv_path.clone(),
            config.cache_records,
        ));
        Self { config, catalog }
    }
}
