use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::loans::applications::StatusPolicy;
use crate::workflows::loans::scoring::{ScoringConfig, DEFAULT_ANNUAL_INTEREST_RATE};

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
    pub lending: LendingConfig,
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
        let ansi = environment == AppEnvironment::Development;

        let lending = LendingConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            lending,
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
    pub ansi: bool,
}

/// Scoring constants and the decision-to-status policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LendingConfig {
    pub scoring: ScoringConfig,
    pub status_policy: StatusPolicy,
}

impl LendingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let annual_interest_rate = match env::var("LOAN_SCORING_ANNUAL_RATE") {
            Ok(raw) => parse_annual_rate(&raw)?,
            Err(_) => DEFAULT_ANNUAL_INTEREST_RATE,
        };

        let status_policy = match env::var("LOAN_STATUS_POLICY") {
            Ok(raw) => StatusPolicy::parse(&raw).ok_or(ConfigError::InvalidStatusPolicy(raw))?,
            Err(_) => StatusPolicy::default(),
        };

        Ok(Self {
            scoring: ScoringConfig {
                annual_interest_rate,
            },
            status_policy,
        })
    }
}

/// Parses a decimal annual rate, accepting only what the scorer can use.
pub fn parse_annual_rate(raw: &str) -> Result<f64, ConfigError> {
    let annual_interest_rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidAnnualRate(raw.to_string()))?;

    ScoringConfig {
        annual_interest_rate,
    }
    .validate()
    .map_err(|_| ConfigError::InvalidAnnualRate(raw.to_string()))?;

    Ok(annual_interest_rate)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAnnualRate(String),
    InvalidStatusPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAnnualRate(raw) => write!(
                f,
                "LOAN_SCORING_ANNUAL_RATE must be a decimal rate in [0, 1), found '{raw}'"
            ),
            ConfigError::InvalidStatusPolicy(raw) => write!(
                f,
                "LOAN_STATUS_POLICY must be 'source' or 'preserve_review', found '{raw}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAnnualRate(_)
            | ConfigError::InvalidStatusPolicy(_) => None,
        }
    }
}
