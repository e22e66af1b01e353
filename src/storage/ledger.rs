use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Connection, Row, Sqlite, SqlitePool, Transaction};
use thiserror::Error;

use crate::domain::{Account, Cents, Payment, PaymentView};

use super::MIGRATION_001_INITIAL;

/// Tuning knobs for the ledger's connection pool.
///
/// The default keeps exactly one long-lived connection, never recycled, so
/// every transfer and query runs on the same serialized database session.
/// Widening the pool trades that serialization for throughput without
/// changing the transaction protocol.
#[derive(Debug, Clone, Copy)]
pub struct LedgerConfig {
    pub max_connections: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { max_connections: 1 }
    }
}

/// The step of the transfer transaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    /// Decrement of the source account balance.
    Debit,
    /// Increment of the destination account balance.
    Credit,
    /// Insert of the payment ledger row.
    Record,
}

impl std::fmt::Display for TransferStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStep::Debit => write!(f, "debit update"),
            TransferStep::Credit => write!(f, "credit update"),
            TransferStep::Record => write!(f, "payment insert"),
        }
    }
}

/// Errors surfaced by the ledger store. Each phase of the transfer protocol
/// fails distinctly so callers can tell an ordinary aborted transfer from a
/// storage-layer problem.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("cannot run migrations: {0}")]
    Migrate(#[source] sqlx::Error),

    #[error("cannot acquire db connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("cannot begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    /// A transfer step failed and the transaction was rolled back in full.
    #[error("{step} failed: {source}")]
    Step {
        step: TransferStep,
        #[source]
        source: sqlx::Error,
    },

    /// A transfer step failed and the rollback failed too. The final state
    /// of the transaction is uncertain; treat as fatal, do not retry.
    #[error("{step} failed: {cause}, unable to rollback: {rollback}")]
    RollbackFailed {
        step: TransferStep,
        cause: sqlx::Error,
        rollback: sqlx::Error,
    },

    /// All statements succeeded but the commit did not.
    #[error("cannot commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the transaction's final state is uncertain and the error
    /// must be escalated rather than retried.
    pub fn is_rollback_failure(&self) -> bool {
        matches!(self, StoreError::RollbackFailed { .. })
    }
}

/// The ledger store: sole owner of the persistent accounts and payments
/// tables and the only component allowed to mutate them.
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Create a ledger over an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the database at the given URL.
    ///
    /// Pool sizing follows `config`; idle timeout and connection lifetime
    /// are always disabled so connections live as long as the process.
    pub async fn connect(database_url: &str, config: LedgerConfig) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;
        Ok(Self::new(pool))
    }

    /// Create the schema if it does not exist.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Migrate)?;
        Ok(())
    }

    /// Connect and migrate in one step.
    pub async fn init(database_url: &str, config: LedgerConfig) -> Result<Self, StoreError> {
        let ledger = Self::connect(database_url, config).await?;
        ledger.migrate().await?;
        Ok(ledger)
    }

    /// The underlying pool, for out-of-band administration (account
    /// provisioning, test fixtures). The transfer protocol never uses this.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Move `amount` cents from one account to another and record the
    /// payment, all within a single serializable transaction.
    ///
    /// Three steps run on one dedicated connection: debit the source,
    /// credit the destination, insert the payment row. If any step fails
    /// the transaction is rolled back in full and no balance change is
    /// observable; a failed rollback surfaces as the distinct
    /// [`StoreError::RollbackFailed`]. Dropping the future mid-flight
    /// aborts the transaction the same way.
    ///
    /// Deliberately permissive: balances may go negative, and a transfer
    /// touching a non-existent account updates zero rows rather than
    /// failing. Validation belongs to the caller.
    pub async fn transfer(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Cents,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::Acquire)?;
        let mut tx = conn.begin().await.map_err(StoreError::Begin)?;

        let debit = sqlx::query("UPDATE accounts SET balance = balance - ? WHERE id = ?")
            .bind(amount)
            .bind(from_account)
            .execute(&mut *tx)
            .await;
        if let Err(cause) = debit {
            return Err(Self::abort(tx, TransferStep::Debit, cause).await);
        }

        let credit = sqlx::query("UPDATE accounts SET balance = balance + ? WHERE id = ?")
            .bind(amount)
            .bind(to_account)
            .execute(&mut *tx)
            .await;
        if let Err(cause) = credit {
            return Err(Self::abort(tx, TransferStep::Credit, cause).await);
        }

        let record =
            sqlx::query("INSERT INTO payments (from_account, amount, to_account) VALUES (?, ?, ?)")
                .bind(from_account)
                .bind(amount)
                .bind(to_account)
                .execute(&mut *tx)
                .await;
        if let Err(cause) = record {
            return Err(Self::abort(tx, TransferStep::Record, cause).await);
        }

        tx.commit().await.map_err(StoreError::Commit)
    }

    /// Roll back after a failed step, keeping both causes when the rollback
    /// itself fails.
    async fn abort(
        tx: Transaction<'_, Sqlite>,
        step: TransferStep,
        cause: sqlx::Error,
    ) -> StoreError {
        match tx.rollback().await {
            Ok(()) => StoreError::Step { step, source: cause },
            Err(rollback) => StoreError::RollbackFailed {
                step,
                cause,
                rollback,
            },
        }
    }

    /// List every payment as double-entry bookkeeping: each stored row
    /// yields its outgoing view followed by its incoming view, so the
    /// result holds twice as many entries as the payments table. No
    /// ordering is guaranteed beyond what storage returns.
    pub async fn list_payments(&self) -> Result<Vec<PaymentView>, StoreError> {
        let rows = sqlx::query("SELECT from_account, amount, to_account FROM payments")
            .fetch_all(&self.pool)
            .await?;

        let mut views = Vec::with_capacity(rows.len() * 2);
        for row in &rows {
            let payment = Self::row_to_payment(row)?;
            views.extend(payment.double_entry());
        }
        Ok(views)
    }

    /// List all accounts with their current balances.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query("SELECT id, balance, currency FROM accounts")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_account).collect()
    }

    fn row_to_payment(row: &SqliteRow) -> Result<Payment, StoreError> {
        Ok(Payment {
            from_account: row.try_get("from_account")?,
            amount: row.try_get("amount")?,
            to_account: row.try_get("to_account")?,
        })
    }

    fn row_to_account(row: &SqliteRow) -> Result<Account, StoreError> {
        Ok(Account {
            id: row.try_get("id")?,
            balance: row.try_get("balance")?,
            currency: row.try_get("currency")?,
        })
    }
}
