use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

const ENV_PREFIX: &str = "LINKSHELF_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_seed_sample_bookmarks")]
    pub seed_sample_bookmarks: bool,

    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    #[serde(default = "default_metadata_user_agent")]
    pub metadata_user_agent: String,

    #[serde(default = "default_cors_allow_any_origin")]
    pub cors_allow_any_origin: bool,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    listen_address: Option<String>,
    log_dir: Option<String>,
    seed_sample_bookmarks: Option<bool>,
    metadata_timeout_secs: Option<u64>,
    metadata_user_agent: Option<String>,
    cors_allow_any_origin: Option<bool>,
}

fn default_listen_address() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_seed_sample_bookmarks() -> bool {
    true
}

fn default_metadata_timeout_secs() -> u64 {
    5
}

fn default_metadata_user_agent() -> String {
    format!("linkshelf/{}", crate::version::VERSION)
}

fn default_cors_allow_any_origin() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::merge(PartialServerConfig::default(), PartialServerConfig::default())
    }
}

impl ServerConfig {
    /// Loads the config in layers: defaults, then the optional TOML file,
    /// then `LINKSHELF_*` environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path_str) if Path::new(path_str).exists() => read_file_config(path_str)?,
            _ => PartialServerConfig::default(),
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::prefixed(ENV_PREFIX).from_env()?;

        // 3. Merge: environment overrides file
        let config = Self::merge(file_config, env_config);
        config.check()?;
        Ok(config)
    }

    fn merge(file_config: PartialServerConfig, env_config: PartialServerConfig) -> Self {
        ServerConfig {
            listen_address: env_config
                .listen_address
                .or(file_config.listen_address)
                .unwrap_or_else(default_listen_address),
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            seed_sample_bookmarks: env_config
                .seed_sample_bookmarks
                .or(file_config.seed_sample_bookmarks)
                .unwrap_or_else(default_seed_sample_bookmarks),
            metadata_timeout_secs: env_config
                .metadata_timeout_secs
                .or(file_config.metadata_timeout_secs)
                .unwrap_or_else(default_metadata_timeout_secs),
            metadata_user_agent: env_config
                .metadata_user_agent
                .or(file_config.metadata_user_agent)
                .unwrap_or_else(default_metadata_user_agent),
            cors_allow_any_origin: env_config
                .cors_allow_any_origin
                .or(file_config.cors_allow_any_origin)
                .unwrap_or_else(default_cors_allow_any_origin),
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.metadata_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "metadata_timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

fn read_file_config(path_str: &str) -> Result<PartialServerConfig, ConfigError> {
    let contents = fs::read_to_string(path_str).map_err(|source| ConfigError::Read {
        path: path_str.to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path_str.to_string(),
        source,
    })
}
