pub mod board;
pub mod error;
pub mod game;
pub mod ledger;
pub mod model;

pub use error::{ClueError, ClueResult};

/// Name and version reported by the harness binary.
pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "clueless-auto"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
