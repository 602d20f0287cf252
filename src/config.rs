use crate::error::{LibraryError, Result};
use crate::storage::DatabaseUri;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for from the working directory upwards.
pub const CONFIG_FILE: &str = ".library.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_uri")]
    pub uri: String,
}

fn default_database_uri() -> String {
    "file://.library".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: default_database_uri(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret used to sign login tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// The one password accepted for every account.
    #[serde(default = "default_shared_password")]
    pub shared_password: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_jwt_secret() -> String {
    "change-me".to_string()
}

fn default_shared_password() -> String {
    "secret".to_string()
}

fn default_token_ttl_secs() -> u64 {
    60 * 60
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            shared_password: default_shared_password(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// How long an error banner stays visible.
    #[serde(default = "default_error_display_secs")]
    pub error_display_secs: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:4000/".to_string()
}

fn default_error_display_secs() -> u64 {
    5
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            error_display_secs: default_error_display_secs(),
        }
    }
}

impl LibraryConfig {
    /// Load the nearest `.library.yml` at or above `start_path`.
    ///
    /// Returns the config and the directory it was found in.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        let config = Self::load_file(&config_path)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| LibraryError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    /// Like [`LibraryConfig::load`], but falls back to defaults rooted at `start_path`.
    pub fn load_or_default(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::load(start_path) {
            Err(LibraryError::NotInitialized) => {
                tracing::debug!(path = %start_path.display(), "No config file, using defaults");
                Ok((Self::default(), start_path.to_path_buf()))
            }
            other => other,
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LibraryConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(LibraryError::NotInitialized);
            }
        }
    }

    pub fn database_uri(&self, project_root: &Path) -> Result<DatabaseUri> {
        DatabaseUri::parse(&self.database.uri, project_root)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
