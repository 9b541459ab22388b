//! Configuration module
//!
//! Loads configuration from environment variables. Callers load `.env` with
//! `dotenvy` first.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::{Amount, Balance};
use crate::logging::{
    LogFileName, LogFormat, LogLevel, LoggerConfig, DEFAULT_BACKUP_COUNT, DEFAULT_MAX_FILE_SIZE,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the active log file and its backups
    pub log_dir: PathBuf,

    /// Minimum severity written to the log
    pub log_level: LogLevel,

    /// Bytes per log file before rotation
    pub max_log_file_size: u64,

    /// Rotated log files to keep
    pub backup_log_count: usize,

    /// Record layout; each binary picks its own default when unset
    pub log_format: Option<LogFormat>,

    /// Wipe `log_dir` at startup
    pub reset_log_dir: bool,

    /// Starting balance for the withdrawal tool
    pub initial_balance: Balance,

    /// Amount the withdrawal tool tries to take out
    pub withdrawal_amount: Amount,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        let log_level: LogLevel = parse_or(&lookup, "LOG_LEVEL", "INFO")?;
        let max_log_file_size: u64 =
            parse_or(&lookup, "MAX_LOG_FILE_SIZE", &DEFAULT_MAX_FILE_SIZE.to_string())?;
        if max_log_file_size == 0 {
            return Err(ConfigError::InvalidValue("MAX_LOG_FILE_SIZE"));
        }
        let backup_log_count =
            parse_or(&lookup, "BACKUP_LOG_COUNT", &DEFAULT_BACKUP_COUNT.to_string())?;

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT"))?,
            ),
            None => None,
        };

        let reset_log_dir = match lookup("LOG_RESET_DIR") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue("LOG_RESET_DIR"))?,
            None => false,
        };

        let initial_balance: Balance = parse_or(&lookup, "INITIAL_BALANCE", "500.0")?;
        let withdrawal_amount: Amount = parse_or(&lookup, "WITHDRAWAL_AMOUNT", "600.0")?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", "5000")?;

        Ok(Self {
            log_dir,
            log_level,
            max_log_file_size,
            backup_log_count,
            log_format,
            reset_log_dir,
            initial_balance,
            withdrawal_amount,
            host,
            port,
        })
    }

    /// Logger settings for this configuration.
    pub fn logger_config(&self, default_format: LogFormat, file_name: LogFileName) -> LoggerConfig {
        LoggerConfig {
            log_dir: self.log_dir.clone(),
            log_level: self.log_level,
            max_file_size: self.max_log_file_size,
            backup_count: self.backup_log_count,
            format: self.log_format.unwrap_or(default_format),
            file_name,
            reset_dir: self.reset_log_dir,
            console: false,
        }
    }
}

/// Parse `key`, falling back to `default` when the variable is unset.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_log_file_size, 5_242_880);
        assert_eq!(config.backup_log_count, 5);
        assert_eq!(config.log_format, None);
        assert!(!config.reset_log_dir);
        assert_eq!(config.initial_balance.value(), dec!(500.0));
        assert_eq!(config.withdrawal_amount.value(), dec!(600.0));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("LOG_DIR", "/tmp/finance"),
            ("LOG_LEVEL", "debug"),
            ("MAX_LOG_FILE_SIZE", "1024"),
            ("BACKUP_LOG_COUNT", "0"),
            ("LOG_FORMAT", "detailed"),
            ("LOG_RESET_DIR", "true"),
            ("INITIAL_BALANCE", "1000"),
            ("WITHDRAWAL_AMOUNT", "250.5"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.log_dir, PathBuf::from("/tmp/finance"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.max_log_file_size, 1024);
        assert_eq!(config.backup_log_count, 0);
        assert_eq!(config.log_format, Some(LogFormat::Detailed));
        assert!(config.reset_log_dir);
        assert_eq!(config.initial_balance.value(), dec!(1000));
        assert_eq!(config.withdrawal_amount.value(), dec!(250.5));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("LOG_LEVEL", "loud"),
            ("MAX_LOG_FILE_SIZE", "five"),
            ("MAX_LOG_FILE_SIZE", "0"),
            ("BACKUP_LOG_COUNT", "-1"),
            ("LOG_FORMAT", "xml"),
            ("LOG_RESET_DIR", "maybe"),
            ("INITIAL_BALANCE", "-5"),
            ("WITHDRAWAL_AMOUNT", "abc"),
            ("PORT", "99999"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(k) if k == key),
                "{key}={value} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_logger_config_uses_default_format_when_unset() {
        let config = load(&[]).unwrap();
        let logger = config.logger_config(LogFormat::Simple, LogFileName::Fixed("app.log".into()));
        assert_eq!(logger.format, LogFormat::Simple);

        let config = load(&[("LOG_FORMAT", "json")]).unwrap();
        let logger = config.logger_config(LogFormat::Simple, LogFileName::Timestamped);
        assert_eq!(logger.format, LogFormat::Json);
        assert_eq!(logger.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }
}
