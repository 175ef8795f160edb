use std::sync::Arc;

use crate::api::{NewsApi, NewsClient};
use crate::app::error::Result;
use crate::config::Config;

/// Wires the loaded configuration to a shared API client.
pub struct AppContext {
    pub config: Config,
    pub client: Arc<dyn NewsApi + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client: Arc<dyn NewsApi + Send + Sync> = Arc::new(NewsClient::new(&config)?);
        Ok(Self { config, client })
    }
}
