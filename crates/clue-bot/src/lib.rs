pub mod bot;

pub use bot::{
    AutoPlayer, BotParams, LedgerView, MovePlan, MovePlanner, PlayerRegistry, ProposedMove,
    SuggestionPlanner, TieBreak, TieBreaker, TurnPhase,
};
