//! Withdrawal simulator
//!
//! Run with: cargo run --bin withdraw
//!
//! Starts from `INITIAL_BALANCE`, attempts to withdraw `WITHDRAWAL_AMOUNT`
//! and records the outcome in a timestamped log file under `LOG_DIR`.

use finance_log::logging::{self, LogFileName, LogFormat};
use finance_log::{run_withdrawal, Config, TransactionProcessor};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let logger = logging::configure(
        &config.logger_config(LogFormat::Detailed, LogFileName::Timestamped),
    )?;
    logger.install()?;

    let mut processor = TransactionProcessor::new(config.initial_balance);

    match run_withdrawal(&mut processor, config.withdrawal_amount) {
        Ok(balance) => println!("Withdrawal succeeded, new balance: {balance}"),
        Err(e) => println!("Handled withdrawal error: {e}"),
    }

    println!("Log written to {}", logger.log_file().display());

    Ok(())
}
