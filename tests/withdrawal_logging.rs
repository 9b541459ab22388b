//! Withdrawal and log rotation integration tests

use std::fs;

use finance_log::domain::{log_finance_operation, FinanceOperation};
use finance_log::logging::{self, backup_path, LogFileName, LogFormat, LoggerConfig};
use finance_log::{run_withdrawal, Amount, Balance, ErrorCode, TransactionProcessor};
use rust_decimal_macros::dec;

mod common;

#[test]
fn test_rejected_withdrawal_logs_one_error() {
    let dir = tempfile::tempdir().unwrap();
    let logger = common::logger(dir.path(), LogFormat::Detailed);
    let mut processor = TransactionProcessor::new(Balance::new(dec!(500.0)).unwrap());

    let result = logger.in_scope(|| {
        run_withdrawal(&mut processor, Amount::new(dec!(600.0)).unwrap())
    });

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DEFAULT);
    assert_eq!(processor.balance().value(), dec!(500.0));

    let contents = common::read_log(&logger);
    let errors = common::records_at(&contents, "ERROR");
    assert_eq!(errors.len(), 1, "log was: {contents}");
    assert!(errors[0].contains("Error Code: [1000]"));
    assert!(errors[0].contains("error message: [Insufficient funds for the withdrawal]"));
    assert!(errors[0].contains(" \tprocessor.rs \trun_withdrawal() \t"));

    assert!(contents.contains("Attempting to withdraw 600.0 from an account balance of 500.0."));
    assert!(contents.contains("Transaction processing completed."));
    assert!(!contents.contains("Transaction successful!"));
}

#[test]
fn test_successful_withdrawal_logs_new_balance() {
    let dir = tempfile::tempdir().unwrap();
    let logger = common::logger(dir.path(), LogFormat::Simple);
    let mut processor = TransactionProcessor::new(Balance::new(dec!(500.0)).unwrap());

    let balance = logger
        .in_scope(|| processor.withdraw(Amount::new(dec!(200.0)).unwrap()))
        .unwrap();

    assert_eq!(balance.value(), dec!(300.0));

    let contents = common::read_log(&logger);
    let info = common::records_at(&contents, "INFO");
    assert_eq!(info.len(), 1, "log was: {contents}");
    assert!(info[0].ends_with("INFO: Transaction successful! New balance: 300.0"));
    assert!(common::records_at(&contents, "ERROR").is_empty());
}

#[test]
fn test_each_successful_withdrawal_appends_one_info_record() {
    let dir = tempfile::tempdir().unwrap();
    let logger = common::logger(dir.path(), LogFormat::Simple);
    let mut processor = TransactionProcessor::new(Balance::new(dec!(100)).unwrap());

    let amounts = [dec!(0), dec!(10), dec!(0.5), dec!(89.5)];
    for (i, amount) in amounts.iter().enumerate() {
        let before = processor.balance().value();
        let after = logger
            .in_scope(|| processor.withdraw(Amount::new(*amount).unwrap()))
            .unwrap();

        assert_eq!(after.value(), before - amount);
        let contents = common::read_log(&logger);
        assert_eq!(common::records_at(&contents, "INFO").len(), i + 1);
    }

    assert!(processor.balance().value().is_zero());
}

#[test]
fn test_rotation_keeps_backup_count_files() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logging::configure(&LoggerConfig {
        log_dir: dir.path().join("logs"),
        max_file_size: 256,
        backup_count: 2,
        file_name: LogFileName::Fixed("app.log".to_string()),
        ..LoggerConfig::default()
    })
    .unwrap();

    logger.in_scope(|| {
        for i in 0..50 {
            log_finance_operation(&FinanceOperation::new(format!("Deposit-{i}"), i));
        }
    });

    let active = logger.log_file();
    assert!(fs::metadata(&active).unwrap().len() <= 256);
    assert!(backup_path(&active, 1).exists());
    assert!(backup_path(&active, 2).exists());
    assert!(!backup_path(&active, 3).exists());

    let files = fs::read_dir(dir.path().join("logs")).unwrap().count();
    assert_eq!(files, 3);

    // newest record stays in the active file
    assert!(common::read_log(&logger).contains("Operation: Deposit-49, Amount: 49"));
}

#[test]
fn test_timestamped_log_file_created_in_dir() {
    let dir = tempfile::tempdir().unwrap();
    let logger = logging::configure(&LoggerConfig {
        log_dir: dir.path().join("logs"),
        format: LogFormat::Detailed,
        file_name: LogFileName::Timestamped,
        ..LoggerConfig::default()
    })
    .unwrap();

    logger.in_scope(|| tracing::info!("Application started."));

    let log_file = logger.log_file();
    let name = log_file.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("log_") && name.ends_with(".log"));
    assert!(common::read_log(&logger).contains(" \tApplication started."));
}
