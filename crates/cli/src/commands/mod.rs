//! Command implementations, one module per surface.

pub mod addresses;
pub mod auth;
pub mod browse;
pub mod cart;
pub mod menu;
pub mod orders;

use thiserror::Error;

use plateful_client::ClientError;
use plateful_client::config::{ClientConfig, ConfigError};
use plateful_client::store::{RestStore, StoreError, StoreErrorKind};

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Hint appended to authentication failures.
    pub(crate) fn is_auth_failure(&self) -> bool {
        let store_error = match self {
            Self::Store(e) => Some(e),
            Self::Client(ClientError::Remote(e)) => Some(e),
            _ => None,
        };
        store_error.is_some_and(|e| matches!(e.kind, StoreErrorKind::Unauthorized))
    }
}

/// Build a store from the environment. Commands that need an authenticated
/// session rely on `PLATEFUL_API_TOKEN` being set.
pub(crate) fn connect() -> Result<RestStore, CliError> {
    let config = ClientConfig::from_env()?;
    Ok(RestStore::new(&config)?)
}

/// Map an error to terminal-friendly text, adding a login hint on 401s.
pub(crate) fn render_error(e: &CliError) -> String {
    if e.is_auth_failure() {
        format!("{e}\nhint: log in with `plateful login` and export PLATEFUL_API_TOKEN")
    } else {
        e.to_string()
    }
}
