use serde::Serialize;

/// Phase of a hand, in dealing order.
///
/// `None` precedes the deal and `Showdown` is terminal. The derived ordering
/// follows declaration order, which ledger scans rely on.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Round {
    #[default]
    None,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Round {
    pub const fn all() -> [Self; 4] {
        [Self::PreFlop, Self::Flop, Self::Turn, Self::River]
    }
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::None => Some(Self::PreFlop),
            Self::PreFlop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => Some(Self::Showdown),
            Self::Showdown => None,
        }
    }
    pub fn previous(&self) -> Self {
        match self {
            Self::None | Self::PreFlop => Self::None,
            Self::Flop => Self::PreFlop,
            Self::Turn => Self::Flop,
            Self::River => Self::Turn,
            Self::Showdown => Self::River,
        }
    }
    /// Whether wagers may be placed in this round.
    pub fn is_betting(&self) -> bool {
        matches!(self, Self::PreFlop | Self::Flop | Self::Turn | Self::River)
    }
    /// Community cards turned face up on entering this round.
    pub fn reveals(&self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn | Self::River => 1,
            _ => 0,
        }
    }
    /// Community cards on the board once this round is reached.
    pub fn board(&self) -> usize {
        match self {
            Self::None | Self::PreFlop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River | Self::Showdown => 5,
        }
    }
    /// Zero-based index among betting rounds.
    pub fn index(&self) -> Option<usize> {
        Self::all().iter().position(|r| r == self)
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::PreFlop => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::River => write!(f, "river"),
            Self::Showdown => write!(f, "showdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_to_showdown() {
        let mut round = Round::None;
        let mut seen = vec![round];
        while let Some(next) = round.next() {
            assert!(next > round);
            round = next;
            seen.push(round);
        }
        assert!(seen.len() == 6);
        assert!(round == Round::Showdown);
    }

    #[test]
    fn board_grows_by_reveals() {
        for round in Round::all().into_iter().skip(1) {
            assert!(round.board() == round.previous().board() + round.reveals());
        }
        assert!(Round::Showdown.index().is_none());
    }
}
