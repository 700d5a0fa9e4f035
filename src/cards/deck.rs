use super::card::Card;
use crate::Arbitrary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A shuffled deck dealt strictly from the top.
///
/// The order is fixed once from a seed, so the same seed always reproduces
/// the same burns, holes, and board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    seed: u64,
    cards: Vec<Card>,
}

impl Deck {
    pub fn shuffled(seed: u64) -> Self {
        let ref mut rng = StdRng::seed_from_u64(seed);
        let mut cards = (0..52u8).rev().map(Card::from).collect::<Vec<_>>();
        cards.shuffle(rng);
        Self { seed, cards }
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
    /// Takes the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

impl Arbitrary for Deck {
    fn random() -> Self {
        Self::shuffled(rand::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::hand::Hand;

    #[test]
    fn seed_reproduces_order() {
        let mut a = Deck::shuffled(7);
        let mut b = Deck::shuffled(7);
        for _ in 0..52 {
            assert!(a.draw() == b.draw());
        }
        assert!(a.draw().is_none());
    }

    #[test]
    fn deals_every_card_once() {
        let mut deck = Deck::random();
        let cards = std::iter::from_fn(|| deck.draw()).collect::<Vec<_>>();
        assert!(cards.len() == 52);
        assert!(Hand::from(cards.as_slice()).size() == 52);
    }
}
