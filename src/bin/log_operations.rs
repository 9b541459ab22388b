//! Operation logging demo
//!
//! Run with: cargo run --bin log_operations
//!
//! Writes a deposit and a withdrawal record through the configured logger.

use finance_log::domain::{log_finance_operation, FinanceOperation};
use finance_log::logging::{self, LogFileName, LogFormat};
use finance_log::Config;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let logger = logging::configure(
        &config.logger_config(LogFormat::Detailed, LogFileName::Timestamped),
    )?;
    logger.install()?;

    tracing::info!("Application started.");

    log_finance_operation(&FinanceOperation::new("Deposit", 1000));
    log_finance_operation(&FinanceOperation::new("Withdrawal", 500));

    tracing::info!("Application finished.");

    println!("Log written to {}", logger.log_file().display());

    Ok(())
}
