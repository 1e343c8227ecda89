use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::earning::{EarningRule, RelationshipPolicy};

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
    pub earning: EarningConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            earning: EarningConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Engine policy knobs. Defaults are the industry-standard values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningConfig {
    pub alliance_partner_multiplier: f64,
    pub non_alliance_multiplier: f64,
    pub default_minimum_miles: u32,
}

impl Default for EarningConfig {
    fn default() -> Self {
        let policy = RelationshipPolicy::default();
        Self {
            alliance_partner_multiplier: policy.alliance_partner_multiplier,
            non_alliance_multiplier: policy.non_alliance_multiplier,
            default_minimum_miles: EarningRule::DEFAULT_MINIMUM_MILES,
        }
    }
}

impl EarningConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let alliance_partner_multiplier = multiplier_var(
            "MILES_ALLIANCE_PARTNER_MULTIPLIER",
            defaults.alliance_partner_multiplier,
        )?;
        let non_alliance_multiplier = multiplier_var(
            "MILES_NON_ALLIANCE_MULTIPLIER",
            defaults.non_alliance_multiplier,
        )?;
        let default_minimum_miles = match env::var("MILES_DEFAULT_MINIMUM") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidMinimum { value: raw })?,
            Err(_) => defaults.default_minimum_miles,
        };

        Ok(Self {
            alliance_partner_multiplier,
            non_alliance_multiplier,
            default_minimum_miles,
        })
    }

    pub fn relationship_policy(&self) -> RelationshipPolicy {
        RelationshipPolicy {
            alliance_partner_multiplier: self.alliance_partner_multiplier,
            non_alliance_multiplier: self.non_alliance_multiplier,
        }
    }
}

fn multiplier_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(ConfigError::InvalidMultiplier { name, value: raw }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMultiplier { name: &'static str, value: String },
    InvalidMinimum { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMultiplier { name, value } => {
                write!(f, "{name} must be a number between 0 and 1 (got '{value}')")
            }
            ConfigError::InvalidMinimum { value } => {
                write!(f, "MILES_DEFAULT_MINIMUM must be a valid u32 (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMultiplier { .. }
            | ConfigError::InvalidMinimum { .. } => None,
        }
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
