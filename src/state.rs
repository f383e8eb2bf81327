use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { config, db })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = self.config.bind_addr();
        addr.parse()
            .with_context(|| format!("invalid listen address {addr}"))
    }
}
