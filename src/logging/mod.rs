//! Logging configuration
//!
//! Builds a [`LoggerHandle`] bound to a size-rotated log file. The handle owns
//! its `tracing` dispatcher: the binaries install it process-wide at startup,
//! tests scope it to the current thread.

pub mod format;
pub mod rotation;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use tracing::dispatcher::{self, DefaultGuard};
use tracing::Dispatch;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

pub use format::{Layout, RecordFormatter};
pub use rotation::{backup_path, RotatingFileAppender};

/// 5 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Minimum severity written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// No dedicated tracing level; filters like `Error`
    Critical,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(LoggingError::UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// Record layout written to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Simple,
    Detailed,
    /// One JSON object per record
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(LogFormat::Simple),
            "detailed" => Ok(LogFormat::Detailed),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

/// How the active log file is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFileName {
    Fixed(String),
    /// `log_<YYYYmmdd_HHMMSS>.log`, stamped when the logger is configured
    Timestamped,
}

impl LogFileName {
    fn resolve(&self) -> String {
        match self {
            LogFileName::Fixed(name) => name.clone(),
            LogFileName::Timestamped => {
                format!("log_{}.log", Local::now().format("%Y%m%d_%H%M%S"))
            }
        }
    }
}

/// Logger settings, read once by [`configure`].
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
    /// Rotate once the active file would reach this many bytes
    pub max_file_size: u64,
    /// Rotated files kept next to the active one. `0` keeps none: a rollover
    /// truncates the active file and its earlier records are lost.
    pub backup_count: usize,
    pub format: LogFormat,
    pub file_name: LogFileName,
    /// Delete the whole directory before opening the log. Destroys history.
    pub reset_dir: bool,
    /// Mirror records to stdout
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: LogLevel::Info,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            backup_count: DEFAULT_BACKUP_COUNT,
            format: LogFormat::Simple,
            file_name: LogFileName::Timestamped,
            reset_dir: false,
            console: false,
        }
    }
}

/// Logger setup failures. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to reset log directory {}: {source}", .path.display())]
    ResetDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to create log directory {}: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("Invalid logger configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    #[error("A global logger is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// A configured logger. Records go to the rotating file (and stdout when
/// `console` was set) only while this handle's dispatcher is active.
#[derive(Clone)]
pub struct LoggerHandle {
    dispatch: Dispatch,
    appender: RotatingFileAppender,
}

impl LoggerHandle {
    /// Path of the active log file.
    pub fn log_file(&self) -> PathBuf {
        self.appender.path()
    }

    /// Make this logger the process-wide default. Succeeds at most once.
    pub fn install(&self) -> Result<(), LoggingError> {
        dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }

    /// Route records from the current thread to this logger until the guard
    /// is dropped.
    pub fn set_default(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("log_file", &self.log_file())
            .finish_non_exhaustive()
    }
}

/// Prepare the log directory, open the active file and build the dispatcher.
pub fn configure(config: &LoggerConfig) -> Result<LoggerHandle, LoggingError> {
    if config.max_file_size == 0 {
        return Err(LoggingError::InvalidConfig(
            "max_file_size must be greater than zero".to_string(),
        ));
    }

    prepare_directory(&config.log_dir, config.reset_dir)?;

    let path = config.log_dir.join(config.file_name.resolve());
    let appender = RotatingFileAppender::open(&path, config.max_file_size, config.backup_count)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let file_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(appender.clone())
            .boxed(),
        LogFormat::Simple => tracing_subscriber::fmt::layer()
            .event_format(RecordFormatter::new(Layout::Simple))
            .with_writer(appender.clone())
            .boxed(),
        LogFormat::Detailed => tracing_subscriber::fmt::layer()
            .event_format(RecordFormatter::new(Layout::Detailed))
            .with_writer(appender.clone())
            .boxed(),
    };
    layers.push(file_layer);

    if config.console {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .boxed(),
        );
    }

    let subscriber = tracing_subscriber::registry()
        .with(layers)
        .with(EnvFilter::new(config.log_level.as_directive()));

    Ok(LoggerHandle {
        dispatch: Dispatch::new(subscriber),
        appender,
    })
}

fn prepare_directory(dir: &Path, reset: bool) -> Result<(), LoggingError> {
    if reset && dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| LoggingError::ResetDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
