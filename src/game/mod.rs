//! Player and game aggregate.

pub mod player;
pub mod setup;
pub mod state;

pub use player::{Player, PlayerColor};
pub use setup::GameSetup;
pub use state::{Activation, Game, Phase, PendingCard};
