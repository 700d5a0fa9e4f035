use super::action::Action;
use super::round::Round;
use crate::Position;
use std::sync::mpsc::Sender;

/// Notifications fired after each state change completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The dealer moved the hand into a round and turned its cards.
    Dealer(Round),
    /// An entry was appended to the ledger.
    Action(Action),
    /// The seat to act changed.
    CurrentPlayer {
        old: Option<Position>,
        new: Option<Position>,
    },
    /// Every pot has been paid out.
    Resolved,
}

/// Observer of a hand, called synchronously on the mutating thread.
pub trait Listener: Send {
    fn notify(&mut self, event: &Event);
}

/// Forwards events to another thread. A hung-up receiver is ignored.
impl Listener for Sender<Event> {
    fn notify(&mut self, event: &Event) {
        if self.send(event.clone()).is_err() {
            log::trace!("event receiver hung up");
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Dealer(round) => write!(f, "dealer {}", round),
            Self::Action(action) => write!(f, "{}", action),
            Self::CurrentPlayer { old, new } => write!(f, "current {:?} -> {:?}", old, new),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}
