use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// An unordered set of cards as a 52-bit mask.
///
/// Each bit marks one card in the set, which keeps unions and rank or suit
/// projections free of allocation.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    /// Disjoint union of two hands.
    pub fn add(lhs: Self, rhs: Self) -> Self {
        assert!(lhs.0 & rhs.0 == 0);
        Self(lhs.0 | rhs.0)
    }
    /// Rank mask of the cards held in one suit.
    pub fn of(&self, suit: Suit) -> u16 {
        Rank::all()
            .into_iter()
            .map(|rank| Card::from((rank, suit)))
            .filter(|card| self.contains(card))
            .map(|card| u16::from(card.rank()))
            .fold(0, |mask, bit| mask | bit)
    }
    /// Number of cards held of one rank.
    pub fn count(&self, rank: Rank) -> usize {
        let shift = u8::from(rank) * 4;
        ((self.0 >> shift) & 0xF).count_ones() as usize
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

/// rank mask of every rank present, regardless of suit
impl From<Hand> for u16 {
    fn from(h: Hand) -> Self {
        Rank::all()
            .into_iter()
            .filter(|rank| h.count(*rank) > 0)
            .map(u16::from)
            .fold(0, |mask, bit| mask | bit)
    }
}

/// Vec<Card> isomorphism, up to ordering. cards come out sorted
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        (0..52u8)
            .map(Card::from)
            .filter(|card| h.contains(card))
            .collect()
    }
}
impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Self(cards.iter().map(|c| u64::from(*c)).fold(0, |a, b| a | b))
    }
}

impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(Self::from(Card::parse(s)?.as_slice()))
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in Vec::<Card>::from(*self) {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_in_suit() {
        let hand = Hand::try_from("2c 3d 4h 5s 6c 7d 8h 9s Tc Jd Qh Ks Ac").unwrap();
        assert!(hand.of(Suit::Club) == 0b_1000100010001);
        assert!(hand.of(Suit::Diamond) == 0b_0001000100010);
        assert!(hand.of(Suit::Heart) == 0b_0010001000100);
        assert!(hand.of(Suit::Spade) == 0b_0100010001000);
    }

    #[test]
    fn counts_by_rank() {
        let hand = Hand::try_from("As Ah Ad Kc").unwrap();
        assert!(hand.count(Rank::Ace) == 3);
        assert!(hand.count(Rank::King) == 1);
        assert!(hand.count(Rank::Two) == 0);
        assert!(u16::from(hand) == u16::from(Rank::Ace) | u16::from(Rank::King));
    }
}
