//! Per-player card ledger ("pad").
//!
//! - `column`: the confirmed-holds and suggestion-response cells for one tracked player.
//! - `pad`: the full matrix owned by one autonomous player, with its update rules.
//! - `summary`: coarse counts used for logging.

mod column;
mod pad;
pub mod summary;

pub use column::PlayerColumn;
pub use pad::{Confirmation, Ledger};
pub use summary::LedgerSummary;
