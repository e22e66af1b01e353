pub mod application;
pub mod domain;
pub mod server;
pub mod storage;

pub use application::WalletService;
pub use domain::*;
pub use storage::{Ledger, LedgerConfig, StoreError};
