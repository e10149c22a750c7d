pub mod event;
pub mod response;

pub use event::{GameEvent, Positions, TurnRequest};
pub use response::{Accusation, CardBundle, Reveal, Suggestion, TurnResponse, UpdateResponse};
