use super::card::Card;
use super::evaluator::Evaluator;
use super::hand::Hand;
use super::hole::Hole;

/// Comparable hand value. Higher wins, equal ties, zero is no hand at all.
pub type Score = u32;

/// Scores a player's hole cards against the board.
///
/// Implementations must give a total order: the same cards always score
/// the same, and hands of equal value score exactly equal.
pub trait Scorer: Send + Sync {
    fn score(&self, hole: Hole, board: &[Card]) -> Score;
}

/// Best five of the seven cards, via [`Evaluator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard;

impl Scorer for Standard {
    fn score(&self, hole: Hole, board: &[Card]) -> Score {
        let hand = Hand::add(Hand::from(hole), Hand::from(board));
        Evaluator::from(hand)
            .strength()
            .map(Score::from)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(hole: &str, board: &str) -> Score {
        let hole = Hole::try_from(hole).unwrap();
        let board = Card::parse(board).unwrap();
        Standard.score(hole, &board)
    }

    #[test]
    fn flush_beats_straight() {
        let board = "9h Th Jc 2h 3d";
        assert!(score("Qd Kc", board) < score("4h 5h", board));
    }

    #[test]
    fn board_plays_ties_exactly() {
        let board = "As Ks Qs Js Ts";
        assert!(score("2c 3d", board) == score("4c 5d", board));
        assert!(score("2c 3d", board) > 0);
    }

    #[test]
    fn kicker_decides() {
        let board = "Ah Ad 7c 5s 2d";
        assert!(score("Kc 3h", board) > score("Qc Jh", board));
    }
}
