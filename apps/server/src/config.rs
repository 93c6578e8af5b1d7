use serde::Deserialize;
use userproxy_shared::constants::DIRECTORY_API_BASE_URL;

/// Server configuration loaded from config.toml with env var overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to. Default: "127.0.0.1"
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on. Default: 3000
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Default: ["http://localhost:5173"]
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Tracing log level. Default: "info"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Outbound Discord API settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Settings for the outbound user-directory client.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// API base URL without trailing slash. Default: "https://discord.com/api/v10"
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// User-Agent sent on outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds. Unset means the HTTP client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_api_base_url() -> String {
    DIRECTORY_API_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    format!(
        "DiscordBot ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            log_level: default_log_level(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file with environment variable overrides.
    ///
    /// Reads `config.toml` from CWD (or path in `CONFIG_PATH` env var). A
    /// missing file means all defaults; env vars are applied either way.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut config = ServerConfig::default();
                config.apply_env_overrides()?;
                Ok(config)
            }
            Err(e) => Err(format!("failed to read {path}: {e}").into()),
        }
    }

    /// Load configuration from a TOML string, then apply env var overrides.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config: ServerConfig = toml::from_str(toml_str)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the config.
    ///
    /// Returns an error if an env var is set but has an invalid format
    /// (e.g., PORT=abc).
    pub fn apply_env_overrides(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(val) = std::env::var("HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("PORT") {
            self.port = val
                .parse()
                .map_err(|_| format!("invalid PORT value: {val}"))?;
        }
        if let Ok(val) = std::env::var("LOG_LEVEL") {
            self.log_level = val;
        }
        if let Ok(val) = std::env::var("DIRECTORY_API_BASE_URL") {
            self.directory.api_base_url = val.trim_end_matches('/').to_string();
        }
        if let Ok(val) = std::env::var("DIRECTORY_REQUEST_TIMEOUT_SECS") {
            let secs = val
                .parse()
                .map_err(|_| format!("invalid DIRECTORY_REQUEST_TIMEOUT_SECS value: {val}"))?;
            self.directory.request_timeout_secs = Some(secs);
        }
        Ok(())
    }
}
