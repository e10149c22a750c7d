mod ledger_view;
mod movement;
mod params;
mod player;
mod registry;
mod suggest;

pub use ledger_view::LedgerView;
pub use movement::{MovePlan, MovePlanner};
pub use params::{BotParams, TieBreak, TieBreaker};
pub use player::{AutoPlayer, ProposedMove, TurnPhase};
pub use registry::PlayerRegistry;
pub use suggest::SuggestionPlanner;
