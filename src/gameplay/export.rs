use super::action::Kind;
use super::hand::Hand;
use super::ledger::Ledger;
use super::round::Round;
use crate::Position;
use crate::SEATS;
use serde::Serialize;

/// Flattened record of a finished hand for statistics and replay.
///
/// `actions` holds one byte per seat per betting round, laid out
/// `seat * 4 + round`, each a union of the flags below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    actions: Vec<u8>,
    community_dealt: usize,
    ledger: Ledger,
}

impl Summary {
    pub const CHECK: u8 = 1;
    pub const CALL: u8 = 2;
    pub const BET: u8 = 4;
    pub const RAISE: u8 = 8;
    pub const RERAISE: u8 = 16;
    pub const FOLD: u8 = 32;
    pub const WIN: u8 = 64;

    pub fn flags(&self, seat: Position, round: Round) -> u8 {
        round
            .index()
            .and_then(|r| self.actions.get(seat * Round::all().len() + r))
            .copied()
            .unwrap_or(0)
    }
    pub fn actions(&self) -> &[u8] {
        &self.actions
    }
    pub fn community_dealt(&self) -> usize {
        self.community_dealt
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl From<&Hand> for Summary {
    fn from(hand: &Hand) -> Self {
        let rounds = Round::all().len();
        let ledger = hand.history();
        let mut actions = vec![0u8; SEATS * rounds];
        let mut raised = false;
        for action in ledger.iter() {
            let Some(round) = action.round().index() else {
                continue;
            };
            let flag = match action.kind() {
                Kind::Check | Kind::CheckRaise => Self::CHECK,
                Kind::Call => Self::CALL,
                Kind::Bet => Self::BET,
                Kind::Raise if raised => Self::RAISE | Self::RERAISE,
                Kind::Raise => Self::RAISE,
                Kind::Fold => Self::FOLD,
                _ => 0,
            };
            if action.kind() == Kind::Raise {
                raised = true;
            }
            if let Some(slot) = actions.get_mut(action.seat() * rounds + round) {
                *slot |= flag;
            }
        }
        for seat in (0..SEATS).filter(|&seat| ledger.win(seat) > 0) {
            let last = ledger
                .iter()
                .rev()
                .filter(|a| a.seat() == seat && !a.kind().is_result())
                .find_map(|a| a.round().index());
            if let Some(round) = last {
                actions[seat * rounds + round] |= Self::WIN;
            }
        }
        let community_dealt = match hand.is_all_in_showdown() {
            true => Round::River.board(),
            false => hand.round().board(),
        };
        Self {
            actions,
            community_dealt,
            ledger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chips;
    use crate::gameplay::FoldKind;
    use crate::gameplay::Player;
    use crate::gameplay::Rules;
    use crate::gameplay::Table;

    fn dealt(stacks: &[(Position, Chips)]) -> Hand {
        let mut table = Table::default();
        for &(seat, chips) in stacks {
            table.sit(Player::new(seat, format!("p{}", seat), chips)).unwrap();
        }
        table.set_button(stacks[0].0).unwrap();
        let mut hand = Hand::new(table, Rules::no_limit(10, 20), 9).unwrap();
        hand.deal().unwrap();
        hand
    }

    #[test]
    fn flags_per_seat_and_round() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 500)]);
        hand.raise(0, 20, 40, None).unwrap();
        hand.raise(1, 50, 60, None).unwrap();
        hand.fold(2, FoldKind::Normal, None).unwrap();
        hand.call(0, 60, None).unwrap();
        hand.advance_round().unwrap();
        hand.bet(1, 40, None).unwrap();
        hand.fold(0, FoldKind::Normal, None).unwrap();
        hand.resolve().unwrap();
        let summary = Summary::from(&hand);
        assert!(summary.flags(0, Round::PreFlop) == Summary::RAISE | Summary::CALL);
        assert!(summary.flags(1, Round::PreFlop) == Summary::RAISE | Summary::RERAISE);
        assert!(summary.flags(2, Round::PreFlop) == Summary::FOLD);
        assert!(summary.flags(0, Round::Flop) == Summary::FOLD);
        assert!(summary.flags(1, Round::Flop) == Summary::BET | Summary::WIN);
        assert!(summary.flags(1, Round::Turn) == 0);
        assert!(summary.community_dealt() == 3);
        assert!(summary.ledger().paid() == summary.ledger().wagered());
    }

    #[test]
    fn walk_wins_on_the_blind() {
        let mut hand = dealt(&[(0, 500), (1, 500)]);
        hand.fold(0, FoldKind::Normal, None).unwrap();
        hand.resolve().unwrap();
        let summary = Summary::from(&hand);
        assert!(summary.flags(1, Round::PreFlop) == Summary::WIN);
        assert!(summary.community_dealt() == 0);
        assert!(serde_json::to_string(&summary).unwrap().contains("community_dealt"));
    }
}
