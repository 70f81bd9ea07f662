use crate::executives::policy::{AllocationPolicy, ExecutivePolicy};
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
    pub executives: ExecutivePolicy,
    /// Request model-backed decisions ahead of the rule-based path.
    pub model_decisions: bool,
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
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let executives = load_executive_policy()?;
        let model_decisions = env_flag("APP_MODEL_DECISIONS");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            executives,
            model_decisions,
        })
    }
}

fn load_executive_policy() -> Result<ExecutivePolicy, ConfigError> {
    let mut policy = ExecutivePolicy::default();
    let defaults = AllocationPolicy::default();

    let worker_share_ratio = ratio_var("APP_WORKER_SHARE_RATIO", defaults.worker_share_ratio)?;
    let maintenance_ratio = ratio_var("APP_MAINTENANCE_RATIO", defaults.maintenance_ratio)?;
    let base_share_fraction =
        ratio_var("APP_BASE_SHARE_FRACTION", defaults.base_share_fraction)?;

    if worker_share_ratio + maintenance_ratio > 1.0 {
        return Err(ConfigError::InvalidRatio {
            name: "APP_WORKER_SHARE_RATIO + APP_MAINTENANCE_RATIO",
            value: worker_share_ratio + maintenance_ratio,
        });
    }

    policy.allocation = AllocationPolicy {
        worker_share_ratio,
        maintenance_ratio,
        base_share_fraction,
    };

    policy.scheduling.setup_breakdown_hours = number_var(
        "APP_SETUP_BREAKDOWN_HOURS",
        policy.scheduling.setup_breakdown_hours,
    )?;
    policy.quality.excellence_threshold =
        number_var("APP_EXCELLENCE_THRESHOLD", policy.quality.excellence_threshold)?;

    Ok(policy)
}

fn number_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidNumber { name }),
        Err(_) => Ok(default),
    }
}

fn ratio_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = number_var(name, default)?;
    if value > 1.0 {
        return Err(ConfigError::InvalidRatio { name, value });
    }
    Ok(value)
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
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

/// Output layout for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str },
    InvalidRatio { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name } => {
                write!(f, "{name} must be a non-negative number")
            }
            ConfigError::InvalidRatio { name, value } => {
                write!(f, "{name} must lie between 0 and 1 (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidRatio { .. } => None,
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
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_WORKER_SHARE_RATIO",
            "APP_MAINTENANCE_RATIO",
            "APP_BASE_SHARE_FRACTION",
            "APP_SETUP_BREAKDOWN_HOURS",
            "APP_EXCELLENCE_THRESHOLD",
            "APP_MODEL_DECISIONS",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.executives.allocation.worker_share_ratio, 0.6);
        assert_eq!(config.executives.scheduling.setup_breakdown_hours, 2.0);
        assert!(!config.model_decisions);
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

    #[test]
    fn reads_allocation_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WORKER_SHARE_RATIO", "0.7");
        env::set_var("APP_MAINTENANCE_RATIO", "0.1");
        env::set_var("APP_MODEL_DECISIONS", "true");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.executives.allocation.worker_share_ratio, 0.7);
        assert_eq!(config.executives.allocation.maintenance_ratio, 0.1);
        assert!(config.model_decisions);
        reset_env();
    }

    #[test]
    fn rejects_ratio_above_one() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WORKER_SHARE_RATIO", "1.4");
        let err = AppConfig::load().expect_err("ratio out of range");
        assert!(matches!(err, ConfigError::InvalidRatio { .. }));
        reset_env();
    }

    #[test]
    fn rejects_combined_shares_above_profit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WORKER_SHARE_RATIO", "0.8");
        env::set_var("APP_MAINTENANCE_RATIO", "0.3");
        let err = AppConfig::load().expect_err("shares exceed profit");
        assert!(err.to_string().contains("APP_MAINTENANCE_RATIO"));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_setup_hours() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SETUP_BREAKDOWN_HOURS", "two");
        let err = AppConfig::load().expect_err("setup hours must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                name: "APP_SETUP_BREAKDOWN_HOURS"
            }
        ));
        reset_env();
    }
}
