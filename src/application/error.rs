use thiserror::Error;

use crate::domain::{Cents, format_cents};
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot use negative value {} as amount", format_cents(*.0))]
    NegativeAmount(Cents),

    #[error("from_account cannot be empty")]
    EmptyFromAccount,

    #[error("to_account cannot be empty")]
    EmptyToAccount,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// True for client-side failures detected before any storage access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::NegativeAmount(_) | AppError::EmptyFromAccount | AppError::EmptyToAccount
        )
    }
}
