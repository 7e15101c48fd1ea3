//! Flag bookkeeping and the flag policy.

pub mod flagging;
pub mod ledger;

pub use flagging::FlagPolicy;
pub use ledger::Ledger;
