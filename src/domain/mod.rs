mod account;
mod money;
mod payment;

pub use account::*;
pub use money::*;
pub use payment::*;
