use serde::{Deserialize, Serialize};

use super::{Cents, serde_cents};

/// A payment is an immutable ledger entry recording one completed transfer.
/// Exactly one row is stored per transfer; readers see it as two derived
/// views (see [`Payment::double_entry`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub from_account: String,
    #[serde(with = "serde_cents")]
    pub amount: Cents,
    pub to_account: String,
}

/// Ephemeral input for a transfer. Consumed to produce two balance mutations
/// and one payment row; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    #[serde(with = "serde_cents")]
    pub amount: Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// One side of a payment as seen by a single account: the source account
/// owns the outgoing view, the destination account the incoming view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentView {
    pub direction: Direction,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    #[serde(with = "serde_cents")]
    pub amount: Cents,
}

impl Payment {
    /// Expand this payment into its double-entry bookkeeping form:
    /// the outgoing view first, then the incoming view.
    ///
    /// This is a pure presentation-layer mapping over the stored row;
    /// the two views are never persisted.
    pub fn double_entry(&self) -> [PaymentView; 2] {
        let outgoing = PaymentView {
            direction: Direction::Outgoing,
            account: self.from_account.clone(),
            from_account: None,
            to_account: Some(self.to_account.clone()),
            amount: self.amount,
        };
        let incoming = PaymentView {
            direction: Direction::Incoming,
            account: self.to_account.clone(),
            from_account: Some(self.from_account.clone()),
            to_account: None,
            amount: self.amount,
        };
        [outgoing, incoming]
    }
}
