//! The hand engine.
//!
//! A [`Hand`] owns the [`Table`] for one deal. Every action is appended to
//! its [`Ledger`], every wager re-partitions the [`Pot`]s, and [`Hand::resolve`]
//! pays them out. Everything else here is derived from those three.
pub mod action;
pub use action::*;

pub mod decision;
pub use decision::*;

pub mod event;
pub use event::*;

pub mod export;
pub use export::*;

pub mod hand;
pub use hand::*;

pub mod ledger;
pub use ledger::*;

pub mod order;
pub use order::*;

pub mod partition;
pub use partition::*;

pub mod player;
pub use player::*;

pub mod pot;
pub use pot::*;

pub mod round;
pub use round::*;

pub mod rules;
pub use rules::*;

pub mod seed;
pub use seed::*;

pub mod shared;
pub use shared::*;

pub mod showdown;
pub use showdown::*;

pub mod table;
pub use table::*;

pub mod violation;
pub use violation::*;
