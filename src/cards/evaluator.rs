use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::strength::Strength;
use super::suit::Suit;

const WHEEL: u16 = 0b_1000000001111;

/// Best five-card value among up to seven cards.
///
/// Categories are searched strongest first over rank counts and per-suit
/// rank masks, so no five-card subsets are enumerated.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    /// None only for an empty hand.
    pub fn strength(&self) -> Option<Strength> {
        let ranking = self.ranking()?;
        Some(Strength::from((ranking, self.kickers(ranking))))
    }
    pub fn ranking(&self) -> Option<Ranking> {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
    }
    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        let n = ranking.n_kickers();
        match ranking {
            Ranking::Flush(high) => self
                .find_suit_of_flush()
                .map(|suit| Kickers::top(self.0.of(suit) & !u16::from(high), n))
                .unwrap_or_default(),
            _ => {
                let used = ranking
                    .ranks()
                    .into_iter()
                    .map(u16::from)
                    .fold(0, |a, b| a | b);
                Kickers::top(u16::from(self.0) & !used, n)
            }
        }
    }

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1, &[]).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2, &[]).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, &[]).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4, &[]).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        let hi = self.find_rank_of_n_oak(2, &[])?;
        let lo = self.find_rank_of_n_oak(2, &[hi])?;
        Some(Ranking::TwoPair(hi, lo))
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        let triple = self.find_rank_of_n_oak(3, &[])?;
        let paired = self.find_rank_of_n_oak(2, &[triple])?;
        Some(Ranking::FullHouse(triple, paired))
    }
    fn find_straight(&self) -> Option<Ranking> {
        Self::find_rank_of_straight(u16::from(self.0)).map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush()
            .map(|suit| Ranking::Flush(Rank::from(self.0.of(suit))))
    }
    fn find_straight_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush()
            .and_then(|suit| Self::find_rank_of_straight(self.0.of(suit)))
            .map(Ranking::StraightFlush)
    }

    fn find_rank_of_straight(ranks: u16) -> Option<Rank> {
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == WHEEL & ranks {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|suit| self.0.of(*suit).count_ones() >= 5)
    }
    fn find_rank_of_n_oak(&self, n: usize, skip: &[Rank]) -> Option<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|rank| !skip.contains(rank))
            .find(|rank| self.0.count(*rank) >= n)
    }
}
