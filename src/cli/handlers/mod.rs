mod client;
mod init;
mod mutate;
mod query;
mod seed;
mod serve;

pub use client::handle_client;
pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use seed::handle_seed;
pub use serve::handle_serve;

use crate::cli::Cli;
use crate::config::LibraryConfig;
use crate::graphql::AppState;
use crate::storage::CatalogStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: LibraryConfig,
    pub root: PathBuf,
}

impl CommandContext {
    pub fn new(config: LibraryConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// Load the configuration for `cli` and apply its command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (mut config, root) = match &cli.config {
            Some(path) => {
                let config = LibraryConfig::load_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                let root = path
                    .parent()
                    .map(|p| p.to_path_buf())
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(cwd);
                (config, root)
            }
            None => LibraryConfig::load_or_default(&cwd)
                .context("Failed to load library configuration")?,
        };

        if let Some(uri) = &cli.database_uri {
            config.database.uri = uri.clone();
        }
        if let Some(secret) = &cli.jwt_secret {
            config.auth.jwt_secret = secret.clone();
        }
        Ok(Self::new(config, root))
    }

    pub fn open_store(&self) -> Result<CatalogStore> {
        let uri = self.config.database_uri(&self.root)?;
        CatalogStore::open(&uri).with_context(|| format!("Failed to open store at {}", uri))
    }

    pub fn app_state(&self) -> Result<Arc<AppState>> {
        let store = self.open_store()?;
        Ok(Arc::new(AppState::new(
            Arc::new(store),
            self.config.auth.clone(),
        )))
    }
}
