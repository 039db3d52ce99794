use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Origin used when `ENTITLEMATE_API_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://entitlemate-backend.onrender.com";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub source: SourceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("ENTITLEMATE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let endpoint = match env::var("ENTITLEMATE_API_ENDPOINT") {
            Ok(raw) => DataEndpoint::parse(&raw)?,
            Err(_) => DataEndpoint::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            source: SourceConfig::new(base_url, endpoint)?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter and formatting controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Path of the entitlement listing on the data API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataEndpoint {
    #[default]
    Entitlements,
    /// Legacy upload-backed deployment that serves the stored file as `/data`.
    Data,
}

impl DataEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Entitlements => "/api/entitlements",
            Self::Data => "/data",
        }
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "" | "entitlements" | "api/entitlements" => Ok(Self::Entitlements),
            "data" => Ok(Self::Data),
            _ => Err(ConfigError::InvalidEndpoint {
                value: raw.to_string(),
            }),
        }
    }
}

/// Where the entitlement records are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub endpoint: DataEndpoint,
}

impl SourceConfig {
    pub fn new(base_url: impl Into<String>, endpoint: DataEndpoint) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let base_url = raw.trim().trim_end_matches('/').to_string();

        let has_scheme = base_url.starts_with("http://") || base_url.starts_with("https://");
        if !has_scheme || base_url.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidBaseUrl { value: raw });
        }

        Ok(Self { base_url, endpoint })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint.path())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            endpoint: DataEndpoint::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBaseUrl { value: String },
    InvalidEndpoint { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBaseUrl { value } => write!(
                f,
                "ENTITLEMATE_API_URL must be an http(s) origin, got '{value}'"
            ),
            ConfigError::InvalidEndpoint { value } => write!(
                f,
                "ENTITLEMATE_API_ENDPOINT must be 'entitlements' or 'data', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBaseUrl { .. }
            | ConfigError::InvalidEndpoint { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ENTITLEMATE_API_URL",
            "ENTITLEMATE_API_ENDPOINT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
        assert_eq!(
            config.source.url(),
            "https://entitlemate-backend.onrender.com/api/entitlements"
        );
    }

    #[test]
    fn api_url_and_endpoint_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ENTITLEMATE_API_URL", "http://localhost:5050/");
        env::set_var("ENTITLEMATE_API_ENDPOINT", "data");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.source.url(), "http://localhost:5050/data");
        reset_env();
    }

    #[test]
    fn rejects_unknown_endpoint_and_bad_origin() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ENTITLEMATE_API_ENDPOINT", "upload");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        reset_env();

        let error = SourceConfig::new("entitlemate.example", DataEndpoint::Entitlements)
            .expect_err("scheme required");
        assert!(error.to_string().contains("entitlemate.example"));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
