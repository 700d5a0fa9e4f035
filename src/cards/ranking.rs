use super::rank::Rank;

/// Hand category with the ranks that define it.
///
/// Variants are declared weakest first, so the derived ordering compares
/// category before rank.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    /// Kickers needed to fill out five cards.
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) | Ranking::Flush(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::TwoPair(..) | Ranking::FourOAK(_) => 1,
            Ranking::Straight(_) | Ranking::FullHouse(..) | Ranking::StraightFlush(_) => 0,
        }
    }
    /// Ranks consumed by the category itself, excluded from kickers.
    pub fn ranks(&self) -> Vec<Rank> {
        match *self {
            Ranking::TwoPair(hi, lo) | Ranking::FullHouse(hi, lo) => vec![hi, lo],
            Ranking::HighCard(r)
            | Ranking::OnePair(r)
            | Ranking::ThreeOAK(r)
            | Ranking::Straight(r)
            | Ranking::Flush(r)
            | Ranking::FourOAK(r)
            | Ranking::StraightFlush(r) => vec![r],
        }
    }
    pub fn category(&self) -> u32 {
        match self {
            Ranking::HighCard(_) => 0,
            Ranking::OnePair(_) => 1,
            Ranking::TwoPair(..) => 2,
            Ranking::ThreeOAK(_) => 3,
            Ranking::Straight(_) => 4,
            Ranking::Flush(_) => 5,
            Ranking::FullHouse(..) => 6,
            Ranking::FourOAK(_) => 7,
            Ranking::StraightFlush(_) => 8,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "HighCard     {}", r),
            Ranking::OnePair(r) => write!(f, "OnePair      {}", r),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair      {}{}", r1, r2),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind {}", r),
            Ranking::Straight(r) => write!(f, "Straight     {}", r),
            Ranking::Flush(r) => write!(f, "Flush        {}", r),
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse    {}{}", r1, r2),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind  {}", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {}", r),
        }
    }
}
