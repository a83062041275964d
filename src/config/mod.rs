use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub screening: ScreeningConfig,
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

        let salary_tolerance_pct = env::var("APP_SALARY_TOLERANCE_PCT")
            .unwrap_or_else(|_| ScreeningConfig::DEFAULT_SALARY_TOLERANCE_PCT.to_string())
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidSalaryTolerance)?;

        let recontact_window_days = env::var("APP_RECONTACT_WINDOW_DAYS")
            .unwrap_or_else(|_| ScreeningConfig::DEFAULT_RECONTACT_WINDOW_DAYS.to_string())
            .parse::<i64>()
            .ok()
            .filter(|value| *value >= 0)
            .ok_or(ConfigError::InvalidRecontactWindow)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            screening: ScreeningConfig {
                salary_tolerance_pct,
                recontact_window_days,
            },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dials for the candidate filter pipeline and outreach suppression.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningConfig {
    /// How far a candidate's salary floor may exceed the offered salary, in percent.
    pub salary_tolerance_pct: f32,
    /// Minimum days before a previously contacted candidate may be re-notified.
    pub recontact_window_days: i64,
}

impl ScreeningConfig {
    pub const DEFAULT_SALARY_TOLERANCE_PCT: f32 = 5.0;
    pub const DEFAULT_RECONTACT_WINDOW_DAYS: i64 = 90;
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            salary_tolerance_pct: Self::DEFAULT_SALARY_TOLERANCE_PCT,
            recontact_window_days: Self::DEFAULT_RECONTACT_WINDOW_DAYS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSalaryTolerance,
    InvalidRecontactWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSalaryTolerance => {
                write!(f, "APP_SALARY_TOLERANCE_PCT must be a non-negative number")
            }
            ConfigError::InvalidRecontactWindow => {
                write!(f, "APP_RECONTACT_WINDOW_DAYS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
