use std::sync::Arc;

use crate::auth::SecretSource;
use crate::config::AppConfig;
use crate::database::{Connector, DatabaseError};

pub type SharedState = Arc<AppState>;

/// Immutable per-process state handed to every handler. Nothing in here is
/// written after startup; query results are never parked here.
#[derive(Debug)]
pub struct AppState {
    pub connector: Connector,
    pub secret: SecretSource,
    pub require_auth: bool,
}

impl AppState {
    pub fn new(connector: Connector, secret: SecretSource, require_auth: bool) -> SharedState {
        Arc::new(Self {
            connector,
            secret,
            require_auth,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<SharedState, DatabaseError> {
        let connector = Connector::from_config(&config.database)?;
        let secret = SecretSource::Env(config.security.jwt_secret_var.clone());
        Ok(Self::new(connector, secret, config.security.require_auth))
    }
}
