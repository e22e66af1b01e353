// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use sqlx::Row;
use tempfile::TempDir;
use walletd::application::WalletService;
use walletd::domain::{Cents, TransferRequest};
use walletd::storage::LedgerConfig;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(WalletService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let url = format!("sqlite:{}?mode=rwc", db_path.display());
    let service = WalletService::init(&url, LedgerConfig::default()).await?;
    Ok((service, temp_dir))
}

/// Provision an account directly, the way an operator would out of band.
pub async fn seed_account(service: &WalletService, id: &str, balance: Cents) -> Result<()> {
    sqlx::query("INSERT INTO accounts (id, balance, currency) VALUES (?, ?, ?)")
        .bind(id)
        .bind(balance)
        .bind("USD")
        .execute(service.ledger().pool())
        .await?;
    Ok(())
}

/// Read an account balance straight from storage.
pub async fn balance_of(service: &WalletService, id: &str) -> Result<Cents> {
    let row = sqlx::query("SELECT balance FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_one(service.ledger().pool())
        .await?;
    Ok(row.get("balance"))
}

/// Count stored payment rows (not views).
pub async fn payment_count(service: &WalletService) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM payments")
        .fetch_one(service.ledger().pool())
        .await?;
    Ok(row.get("count"))
}

pub fn request(from_account: &str, to_account: &str, amount: Cents) -> TransferRequest {
    TransferRequest {
        from_account: from_account.to_string(),
        to_account: to_account.to_string(),
        amount,
    }
}
