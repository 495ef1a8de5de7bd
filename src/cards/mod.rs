//! Cards and tiles.
//!
//! ## Key Types
//!
//! - `CardCategory`: Territory, Character, Building, Venture
//! - `DevelopmentCard`: A tower card with cost alternatives and effects
//! - `DevelopmentDeck`: Undrawn cards, one pile per category
//! - `LeaderCard` / `PlayedLeader`: Leaders in hand and on the table
//! - `ExcommunicationTile` / `PersonalBonusTile`: Tiles handed out during the game

pub mod category;
pub mod deck;
pub mod development;
pub mod leader;
pub mod tiles;

pub use category::CardCategory;
pub use deck::DevelopmentDeck;
pub use development::{CostAlternative, DevelopmentCard};
pub use leader::{LeaderCard, PlayedLeader};
pub use tiles::{ExcommunicationTile, PersonalBonusTile};
