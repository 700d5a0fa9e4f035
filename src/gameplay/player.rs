use super::violation::Violation;
use crate::Chips;
use crate::Position;
use crate::cards::Hole;
use serde::Serialize;

/// A seated player as the hand sees them.
///
/// The table owns players between hands; a hand borrows them through the
/// table for its duration. All-in is not stored: a live player with no
/// chips behind is all-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    seat: Position,
    name: String,
    chips: Chips,
    folded: bool,
    exposed: bool,
    cards: Option<Hole>,
    show_winning: bool,
    muck_losing: bool,
}

impl Player {
    pub fn new(seat: Position, name: impl Into<String>, chips: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            chips,
            folded: false,
            exposed: false,
            cards: None,
            show_winning: false,
            muck_losing: true,
        }
    }
    /// Display preferences for uncontested wins and beaten hands.
    pub fn with_preferences(mut self, show_winning: bool, muck_losing: bool) -> Self {
        self.show_winning = show_winning;
        self.muck_losing = muck_losing;
        self
    }
}

/// Public state accessors.
impl Player {
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    pub fn cards(&self) -> Option<Hole> {
        self.cards
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.chips == 0
    }
    pub fn is_exposed(&self) -> bool {
        self.exposed
    }
    pub fn is_show_winning(&self) -> bool {
        self.show_winning
    }
    pub fn is_muck_losing(&self) -> bool {
        self.muck_losing
    }
}

/// Chip movement.
impl Player {
    /// Posts an ante or blind, short if the stack is smaller.
    /// Returns the chips actually placed.
    pub fn post(&mut self, chips: Chips) -> Chips {
        let placed = chips.min(self.chips).max(0);
        self.chips -= placed;
        placed
    }
    /// Removes chips for a voluntary wager.
    pub fn pay(&mut self, chips: Chips) -> anyhow::Result<()> {
        if chips > self.chips {
            return Err(Violation::Overdraw {
                seat: self.seat,
                chips,
                stack: self.chips,
            }
            .into());
        }
        self.chips -= chips;
        Ok(())
    }
    pub fn win(&mut self, chips: Chips) {
        self.chips += chips;
    }
}

/// Hand lifecycle.
impl Player {
    pub(crate) fn deal(&mut self, cards: Hole) {
        self.cards = Some(cards);
        self.folded = false;
        self.exposed = false;
    }
    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }
    pub(crate) fn expose(&mut self) {
        self.exposed = true;
    }
    /// Clears per-hand state once the hand is over.
    pub fn end_hand(&mut self) {
        self.cards = None;
        self.folded = false;
        self.exposed = false;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .cards
            .map(|hole| hole.to_string())
            .unwrap_or_else(|| "----".to_string());
        let state = match (self.folded, self.is_all_in()) {
            (true, _) => "F",
            (false, true) => "A",
            (false, false) => "P",
        };
        write!(f, "{} {:<10} {} ${:>6} {}", self.seat, self.name, state, self.chips, cards)
    }
}
