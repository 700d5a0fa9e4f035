use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A fully resolved hand value: category first, kickers break ties.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl TryFrom<Hand> for Strength {
    type Error = anyhow::Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        Evaluator::from(hand)
            .strength()
            .ok_or_else(|| anyhow::anyhow!("cannot evaluate an empty hand"))
    }
}

/// order-preserving packing: 4 bits category, 4+4 bits defining ranks,
/// 13 bits kickers. category is offset by one so every hand scores above zero
impl From<Strength> for u32 {
    fn from(s: Strength) -> Self {
        let ranks = s.ranking.ranks();
        let primary = ranks.first().map(|r| u8::from(*r) as u32).unwrap_or(0);
        let secondary = ranks.get(1).map(|r| u8::from(*r) as u32).unwrap_or(0);
        (s.ranking.category() + 1) << 26
            | primary << 22
            | secondary << 18
            | u16::from(s.kickers) as u32
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.ranking, self.kickers)
    }
}
