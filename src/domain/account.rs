use serde::{Deserialize, Serialize};

use super::{Cents, serde_cents};

/// A user account holding a balance.
/// IDs are caller-supplied and globally unique; accounts are created out of
/// band and mutated only by successful transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(with = "serde_cents")]
    pub balance: Cents,
    /// Stored but otherwise unused; there is no currency conversion.
    #[serde(default)]
    pub currency: String,
}
