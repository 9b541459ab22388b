//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use finance_log::logging::{self, LogFileName, LogFormat, LoggerConfig, LoggerHandle};

/// Logger writing `app.log` under `<dir>/logs`
pub fn logger(dir: &Path, format: LogFormat) -> LoggerHandle {
    logging::configure(&LoggerConfig {
        log_dir: dir.join("logs"),
        format,
        file_name: LogFileName::Fixed("app.log".to_string()),
        ..LoggerConfig::default()
    })
    .expect("Failed to configure test logger")
}

pub fn read_log(logger: &LoggerHandle) -> String {
    fs::read_to_string(logger.log_file()).expect("Failed to read log file")
}

/// Records in `contents` logged at `level` (simple or detailed layout)
pub fn records_at<'a>(contents: &'a str, level: &str) -> Vec<&'a str> {
    let simple = format!("] {level}: ");
    let detailed = format!("] \t{level} \t");
    contents
        .lines()
        .filter(|line| line.contains(&simple) || line.contains(&detailed))
        .collect()
}
