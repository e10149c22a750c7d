pub mod card;
pub mod deck;
pub mod hand;
pub mod location;
pub mod player;
pub mod room;
pub mod suspect;
pub mod weapon;
