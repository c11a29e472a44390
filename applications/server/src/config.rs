/// Server configuration
use crate::error::{Result, ServerError};
use lyrics_core::{DownvoteScoring, PageRequest};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_pagination")]
    pub pagination: PaginationSettings,

    #[serde(default)]
    pub votes: VoteSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationSettings {
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl PaginationSettings {
    /// Clamp raw `page`/`size` query values
    pub fn request(&self, page: Option<i64>, size: Option<i64>) -> PageRequest {
        PageRequest::new(page, size, self.default_page_size, self.max_page_size)
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        default_pagination()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VoteSettings {
    /// Make a downvote lower the net `votes` score instead of raising it
    #[serde(default)]
    pub downvote_decrements_score: bool,
}

impl VoteSettings {
    pub fn downvote_scoring(&self) -> DownvoteScoring {
        if self.downvote_decrements_score {
            DownvoteScoring::Decrement
        } else {
            DownvoteScoring::Increment
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` defaults to `config.toml`; a missing file is skipped.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        // Override with environment variables, e.g. LYRICS_AUTH__JWT_SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("LYRICS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set LYRICS_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        let pagination = &self.pagination;
        if pagination.default_page_size < 1 || pagination.max_page_size < pagination.default_page_size
        {
            return Err(ServerError::Config(format!(
                "Invalid page sizes: default {} must be between 1 and max {}",
                pagination.default_page_size, pagination.max_page_size
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/lyrics.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_pagination() -> PaginationSettings {
    PaginationSettings {
        default_page_size: default_page_size(),
        max_page_size: default_max_page_size(),
    }
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            pagination: default_pagination(),
            votes: VoteSettings::default(),
        }
    }
}
