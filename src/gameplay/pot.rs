use super::round::Round;
use crate::Chips;
use crate::Position;
use serde::Serialize;

/// One pot's contributions, keyed by seat in order of first contribution.
///
/// The chip count is always the sum of contributions. A pot opened in an
/// earlier round carries a base snapshot of its contributions so that the
/// current round's chips can be re-split from scratch without touching
/// what earlier rounds put in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pot {
    round: Round,
    side: usize,
    contributions: Vec<(Position, Chips)>,
    base: Vec<(Position, Chips)>,
    base_all_in: bool,
    cap: Option<Chips>,
    winners: Vec<Position>,
}

impl Pot {
    pub fn new(round: Round, side: usize) -> Self {
        Self {
            round,
            side,
            contributions: Vec::new(),
            base: Vec::new(),
            base_all_in: false,
            cap: None,
            winners: Vec::new(),
        }
    }
}

/// Public state accessors.
impl Pot {
    /// Round this pot currently collects for.
    pub fn round(&self) -> Round {
        self.round
    }
    /// Zero for the pot a round opens on, then one more per split.
    pub fn side(&self) -> usize {
        self.side
    }
    pub fn chips(&self) -> Chips {
        self.contributions.iter().map(|(_, chips)| chips).sum()
    }
    /// Chips carried in from earlier rounds.
    pub fn base(&self) -> Chips {
        self.base.iter().map(|(_, chips)| chips).sum()
    }
    /// Whether a player in the pot was all-in when it was carried forward.
    pub fn has_base_all_in(&self) -> bool {
        self.base_all_in
    }
    /// Most any one player may add this round before spilling over.
    pub fn cap(&self) -> Option<Chips> {
        self.cap
    }
    pub fn contributions(&self) -> &[(Position, Chips)] {
        &self.contributions
    }
    pub fn contribution(&self, seat: Position) -> Chips {
        self.contributions
            .iter()
            .find(|(s, _)| *s == seat)
            .map(|(_, chips)| *chips)
            .unwrap_or(0)
    }
    pub fn players(&self) -> impl Iterator<Item = Position> + '_ {
        self.contributions.iter().map(|(seat, _)| *seat)
    }
    pub fn contains(&self, seat: Position) -> bool {
        self.contributions.iter().any(|(s, _)| *s == seat)
    }
    /// A lone contributor means an uncalled excess to hand back.
    pub fn is_overbet(&self) -> bool {
        self.contributions.len() == 1
    }
    pub fn winners(&self) -> &[Position] {
        &self.winners
    }
}

/// Mutation, driven by the partitioner and resolver.
impl Pot {
    /// Adds chips for a seat, registering it as in the pot even for zero.
    pub(crate) fn add(&mut self, seat: Position, chips: Chips) {
        match self.contributions.iter_mut().find(|(s, _)| *s == seat) {
            Some((_, total)) => *total += chips,
            None => self.contributions.push((seat, chips)),
        }
    }
    pub(crate) fn cap_at(&mut self, cap: Chips) {
        self.cap = Some(cap);
    }
    /// Carries the pot into `round`, freezing what it holds as its base.
    pub(crate) fn advance(&mut self, round: Round, base_all_in: bool) {
        self.round = round;
        self.side = 0;
        self.base = self.contributions.clone();
        self.base_all_in = base_all_in;
        self.cap = None;
    }
    /// Drops everything added since the base was frozen.
    pub(crate) fn reset(&mut self) {
        self.contributions = self.base.clone();
        self.cap = None;
    }
    pub(crate) fn award(&mut self, winners: Vec<Position>) {
        self.winners = winners;
    }
}

impl std::fmt::Display for Pot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} pot {} ${}", self.round, self.side, self.chips())?;
        if let Some(cap) = self.cap {
            write!(f, " cap {}", cap)?;
        }
        let seats = self
            .players()
            .map(|seat| seat.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, " [{}]", seats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_carried_base() {
        let mut pot = Pot::new(Round::PreFlop, 0);
        pot.add(1, 20);
        pot.add(2, 20);
        pot.advance(Round::Flop, false);
        pot.add(1, 40);
        pot.add(3, 0);
        assert!(pot.chips() == 80);
        assert!(pot.contains(3));
        pot.reset();
        assert!(pot.chips() == 40);
        assert!(pot.base() == 40);
        assert!(!pot.contains(3));
        assert!(pot.round() == Round::Flop);
    }

    #[test]
    fn lone_contributor_is_overbet() {
        let mut pot = Pot::new(Round::Turn, 1);
        pot.add(5, 60);
        assert!(pot.is_overbet());
        pot.add(6, 60);
        assert!(!pot.is_overbet());
        assert!(pot.contribution(6) == 60);
    }
}
