//! Card primitives and the default hand evaluator.
//!
//! - [`Card`] one byte, `rank * 4 + suit`
//! - [`Hand`] unordered card set as a bitmask
//! - [`Hole`] a player's two private cards
//! - [`Deck`] seeded shuffle dealt from the top
//! - [`Evaluator`] and [`Strength`] best five-card value of up to seven cards
//! - [`Scorer`] the comparable-score contract the hand engine consumes
pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod evaluator;
pub use evaluator::*;

pub mod hand;
pub use hand::*;

pub mod hole;
pub use hole::*;

pub mod kicks;
pub use kicks::*;

pub mod rank;
pub use rank::*;

pub mod ranking;
pub use ranking::*;

pub mod scorer;
pub use scorer::*;

pub mod strength;
pub use strength::*;

pub mod suit;
pub use suit::*;
