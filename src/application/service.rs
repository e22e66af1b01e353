use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::{Account, PaymentView, TransferRequest};
use crate::storage::{Ledger, LedgerConfig};

use super::AppError;

/// Application service for payments between accounts.
/// This is the primary interface for any client (HTTP adapter, CLI, tests):
/// it validates transfer requests before they reach storage and passes read
/// queries straight through. Holds no state beyond the ledger handle.
pub struct WalletService {
    ledger: Ledger,
}

impl WalletService {
    /// Create a new wallet service over the given ledger store.
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Initialize a service with its own database (connect + migrate).
    pub async fn init(database_url: &str, config: LedgerConfig) -> Result<Self, AppError> {
        let ledger = Ledger::init(database_url, config).await?;
        Ok(Self::new(ledger))
    }

    /// Connect to an existing database.
    pub async fn connect(database_url: &str, config: LedgerConfig) -> Result<Self, AppError> {
        let ledger = Ledger::connect(database_url, config).await?;
        Ok(Self::new(ledger))
    }

    /// The underlying ledger store.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Execute a transfer request.
    ///
    /// Rejects negative amounts and empty account identifiers before any
    /// storage access; otherwise delegates to the ledger's transfer
    /// protocol and propagates its result unchanged. No retries here:
    /// serialization conflicts surface to the caller as ordinary failures.
    pub async fn post_payment(&self, req: &TransferRequest) -> Result<(), AppError> {
        if req.amount < 0 {
            return Err(AppError::NegativeAmount(req.amount));
        }
        if req.from_account.is_empty() {
            return Err(AppError::EmptyFromAccount);
        }
        if req.to_account.is_empty() {
            return Err(AppError::EmptyToAccount);
        }

        let started = Instant::now();
        let result = self
            .ledger
            .transfer(&req.from_account, &req.to_account, req.amount)
            .await;
        match &result {
            Ok(()) => info!(
                method = "post_payment",
                from_account = %req.from_account,
                to_account = %req.to_account,
                took = ?started.elapsed(),
                "transfer committed"
            ),
            Err(err) => warn!(
                method = "post_payment",
                from_account = %req.from_account,
                to_account = %req.to_account,
                took = ?started.elapsed(),
                %err,
                "transfer failed"
            ),
        }
        Ok(result?)
    }

    /// List all payments in their double-entry form.
    pub async fn get_payments(&self) -> Result<Vec<PaymentView>, AppError> {
        let started = Instant::now();
        let views = self.ledger.list_payments().await?;
        debug!(method = "get_payments", count = views.len(), took = ?started.elapsed());
        Ok(views)
    }

    /// List all accounts with current balances.
    pub async fn get_accounts(&self) -> Result<Vec<Account>, AppError> {
        let started = Instant::now();
        let accounts = self.ledger.list_accounts().await?;
        debug!(method = "get_accounts", count = accounts.len(), took = ?started.elapsed());
        Ok(accounts)
    }
}
