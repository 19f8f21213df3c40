use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub csrf: CsrfConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Argon2id work factor
#[derive(Debug, Clone, Deserialize)]
pub struct HashingConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsrfConfig {
    #[serde(default = "default_token_ttl")]
    pub token_ttl: i64,
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            password_min_length: default_password_min_length(),
        }
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            token_ttl: default_token_ttl(),
            cleanup_interval: default_cleanup_interval(),
            max_tokens: default_max_tokens(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_max_connections() -> u32 {
    5
}

fn default_memory_kib() -> u32 {
    19_456 // 19 MiB
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_name_min_length() -> usize {
    3
}

fn default_password_min_length() -> usize {
    8
}

fn default_token_ttl() -> i64 {
    7200 // 2 hours
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

fn default_max_tokens() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.host.is_empty() {
            bail!("Server host must not be empty");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.database.path.as_os_str().is_empty() {
            bail!("database path must not be empty");
        }

        if self.database.max_connections == 0 {
            bail!("max_connections must be greater than 0");
        }

        // Argon2 enforces its own bounds on the work factor
        argon2::Params::new(
            self.hashing.memory_kib,
            self.hashing.iterations,
            self.hashing.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid hashing parameters: {}", e))?;

        if self.validation.name_min_length == 0 {
            bail!("name_min_length must be greater than 0");
        }

        if self.validation.password_min_length == 0 {
            bail!("password_min_length must be greater than 0");
        }

        if self.csrf.cleanup_interval == 0 {
            bail!("cleanup_interval must be greater than 0");
        }

        if self.csrf.max_tokens == 0 {
            bail!("csrf max_tokens must be greater than 0");
        }

        if self.csrf.token_ttl <= self.csrf.cleanup_interval as i64 {
            bail!(
                "token_ttl ({}) must be greater than cleanup_interval ({})",
                self.csrf.token_ttl,
                self.csrf.cleanup_interval
            );
        }

        if let Some(api_key) = &self.admin.api_key {
            if api_key.is_empty() {
                bail!("admin api_key must not be empty when set");
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
