use super::action::Action;
use super::action::Kind;
use super::round::Round;
use super::violation::Violation;
use crate::Chips;
use crate::Position;
use serde::Serialize;

/// How far the betting has gone in a round.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PotStatus {
    #[default]
    NoAction,
    Called,
    Raised,
    Reraised,
}

/// Append-only history of a hand.
///
/// Entries are appended in round order, so every round occupies one
/// contiguous run. Each query below is a pure scan; per-round queries only
/// ever look inside that round's run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger(Vec<Action>);

impl TryFrom<Vec<Action>> for Ledger {
    type Error = anyhow::Error;
    fn try_from(actions: Vec<Action>) -> anyhow::Result<Self> {
        let mut ledger = Self::default();
        for action in actions {
            ledger.push(action)?;
        }
        Ok(ledger)
    }
}

impl Ledger {
    /// Appends `action`, refusing one from a round already closed.
    pub fn push(&mut self, action: Action) -> anyhow::Result<()> {
        if let Some(last) = self.0.last().filter(|last| last.round() > action.round()) {
            return Err(Violation::Unordered {
                before: last.round(),
                after: action.round(),
            }
            .into());
        }
        self.0.push(action);
        Ok(())
    }
    pub fn actions(&self) -> &[Action] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Action> {
        self.0.iter()
    }
    /// The contiguous run of entries recorded during `round`.
    pub fn round(&self, round: Round) -> &[Action] {
        let lo = self.0.partition_point(|a| a.round() < round);
        let hi = self.0.partition_point(|a| a.round() <= round);
        &self.0[lo..hi]
    }
    /// Everything recorded up to and including `round`.
    fn through(&self, round: Round) -> &[Action] {
        &self.0[..self.0.partition_point(|a| a.round() <= round)]
    }
}

/// Chip totals.
impl Ledger {
    /// Blinds, calls, bets, and raises by `seat` in `round`.
    pub fn bet(&self, seat: Position, round: Round) -> Chips {
        self.round(round)
            .iter()
            .filter(|a| a.seat() == seat && a.kind().is_bet())
            .map(Action::amount)
            .sum()
    }
    /// Antes by `seat` in `round`.
    pub fn ante(&self, seat: Position, round: Round) -> Chips {
        self.round(round)
            .iter()
            .filter(|a| a.seat() == seat && a.kind() == Kind::Ante)
            .map(Action::amount)
            .sum()
    }
    /// Everything `seat` put in during `round`.
    pub fn contribution(&self, seat: Position, round: Round) -> Chips {
        self.bet(seat, round) + self.ante(seat, round)
    }
    /// Largest per-player bet in `round`.
    pub fn current_bet(&self, round: Round) -> Chips {
        let mut bets = Vec::<(Position, Chips)>::new();
        for action in self.round(round).iter().filter(|a| a.kind().is_bet()) {
            match bets.iter_mut().find(|(seat, _)| *seat == action.seat()) {
                Some((_, total)) => *total += action.amount(),
                None => bets.push((action.seat(), action.amount())),
            }
        }
        bets.into_iter().map(|(_, bet)| bet).max().unwrap_or(0)
    }
    /// Every wager by `seat` over the hand.
    pub fn total(&self, seat: Position) -> Chips {
        self.iter()
            .filter(|a| a.seat() == seat && a.kind().is_wager())
            .map(Action::amount)
            .sum()
    }
    /// Every wager recorded.
    pub fn wagered(&self) -> Chips {
        self.iter()
            .filter(|a| a.kind().is_wager())
            .map(Action::amount)
            .sum()
    }
    /// Wagers recorded through the end of `round`.
    pub fn total_through(&self, round: Round) -> Chips {
        self.through(round)
            .iter()
            .filter(|a| a.kind().is_wager())
            .map(Action::amount)
            .sum()
    }
    /// Wins and overbet returns paid out.
    pub fn paid(&self) -> Chips {
        self.iter()
            .filter(|a| matches!(a.kind(), Kind::Win | Kind::Overbet))
            .map(Action::amount)
            .sum()
    }
    pub fn win(&self, seat: Position) -> Chips {
        self.sum_of(seat, |k| k == Kind::Win)
    }
    pub fn overbet(&self, seat: Position) -> Chips {
        self.sum_of(seat, |k| k == Kind::Overbet)
    }
    /// Antes and blinds posted by everyone.
    pub fn antes_blinds(&self) -> Chips {
        self.iter()
            .filter(|a| a.kind().is_forced())
            .map(Action::amount)
            .sum()
    }
    /// Antes and small blind posted by `seat`.
    pub fn ante_small_blind(&self, seat: Position) -> Chips {
        self.sum_of(seat, |k| matches!(k, Kind::Ante | Kind::SmallBlind))
    }
    /// Largest bet or raise size of the hand, never below `min_bet`.
    pub fn biggest_bet_raise(&self, min_bet: Chips) -> Chips {
        self.iter()
            .filter(|a| a.kind().is_aggressive())
            .map(Action::adjusted)
            .fold(min_bet, Chips::max)
    }
    /// Smallest legal raise size in `round`.
    pub fn min_raise(&self, round: Round, min_bet: Chips) -> Chips {
        self.round(round)
            .iter()
            .filter(|a| a.kind().is_aggressive())
            .map(Action::adjusted)
            .fold(min_bet, Chips::max)
    }
    fn sum_of(&self, seat: Position, kind: impl Fn(Kind) -> bool) -> Chips {
        self.iter()
            .filter(|a| a.seat() == seat && kind(a.kind()))
            .map(Action::amount)
            .sum()
    }
}

/// Who did what.
impl Ledger {
    pub fn is_action_in(&self, round: Round) -> bool {
        !self.round(round).is_empty()
    }
    /// Any decision by `seat` in `round`. Forced bets and results don't count.
    pub fn has_acted(&self, seat: Position, round: Round) -> bool {
        self.round(round)
            .iter()
            .any(|a| a.seat() == seat && a.kind().is_voluntary())
    }
    pub fn last_action(&self, seat: Position) -> Option<&Action> {
        self.iter().rev().find(|a| a.seat() == seat)
    }
    pub fn last_action_in(&self, seat: Position, round: Round) -> Option<&Action> {
        self.round(round).iter().rev().find(|a| a.seat() == seat)
    }
    /// Strongest decision by `seat` in `round`; a check-raise reads as a check.
    pub fn last_action_ai(&self, seat: Position, round: Round) -> Option<Kind> {
        self.round(round)
            .iter()
            .filter(|a| a.seat() == seat)
            .map(Action::kind)
            .filter_map(|k| k.weight().map(|w| (w, k)))
            .max_by_key(|(w, _)| *w)
            .map(|(_, k)| match k {
                Kind::CheckRaise => Kind::Check,
                k => k,
            })
    }
    pub fn last_action_this_round(&self, round: Round) -> Option<&Action> {
        self.round(round).last()
    }
    /// Most recent entry that is not a showdown result.
    pub fn last_betting_action(&self) -> Option<&Action> {
        self.iter().rev().find(|a| !a.kind().is_result())
    }
    pub fn num_raises(&self, round: Round) -> usize {
        self.count(round, Kind::Raise)
    }
    pub fn num_callers(&self, round: Round) -> usize {
        self.count(round, Kind::Call)
    }
    /// Raises in `round` before the most recent action by `seat`.
    pub fn num_prior_raises(&self, seat: Position, round: Round) -> usize {
        let actions = self.round(round);
        match actions.iter().rposition(|a| a.seat() == seat) {
            Some(i) => actions[..i].iter().filter(|a| a.kind() == Kind::Raise).count(),
            None => 0,
        }
    }
    /// Round in which `seat` folded, if it did.
    pub fn fold_round(&self, seat: Position) -> Option<Round> {
        self.iter()
            .find(|a| a.seat() == seat && a.kind() == Kind::Fold)
            .map(Action::round)
    }
    /// Seat that opened the betting in `round`.
    pub fn bettor(&self, round: Round) -> Option<Position> {
        self.round(round)
            .iter()
            .find(|a| a.kind() == Kind::Bet)
            .map(Action::seat)
    }
    /// Seat that raised last in `round`.
    pub fn raiser(&self, round: Round) -> Option<Position> {
        self.round(round)
            .iter()
            .rev()
            .find(|a| a.kind() == Kind::Raise)
            .map(Action::seat)
    }
    pub fn big_blind(&self) -> Option<Position> {
        self.iter()
            .find(|a| a.kind() == Kind::BigBlind)
            .map(Action::seat)
    }
    /// Seat that must show first: the last raiser of the hand, otherwise
    /// the opening bettor of the latest round that saw a bet.
    pub fn first_to_show(&self) -> Option<Position> {
        let mut saved: Option<&Action> = None;
        for action in self.iter().rev() {
            if let Some(bet) = saved {
                if action.round() < bet.round() {
                    return Some(bet.seat());
                }
            }
            match action.kind() {
                Kind::Raise => return Some(action.seat()),
                Kind::Bet => saved = Some(action),
                _ => {}
            }
        }
        saved.map(Action::seat)
    }
    /// First bet or raise in `round`, skipping seats `skip` rejects.
    pub fn first_bettor(&self, round: Round, skip: impl Fn(Position) -> bool) -> Option<Position> {
        self.round(round)
            .iter()
            .filter(|a| !skip(a.seat()))
            .find(|a| a.kind().is_aggressive())
            .map(Action::seat)
    }
    /// Last bet or raise in `round`, skipping seats `skip` rejects.
    pub fn last_bettor(&self, round: Round, skip: impl Fn(Position) -> bool) -> Option<Position> {
        self.round(round)
            .iter()
            .rev()
            .filter(|a| !skip(a.seat()))
            .find(|a| a.kind().is_aggressive())
            .map(Action::seat)
    }
    /// Folds since the most recent bet or raise.
    pub fn num_folds_since_last_bet(&self) -> usize {
        self.iter()
            .rev()
            .take_while(|a| !a.kind().is_aggressive())
            .filter(|a| a.kind() == Kind::Fold)
            .count()
    }
    /// Derived on every call; pre-flop history is small.
    pub fn was_raised_pre_flop(&self) -> bool {
        self.count(Round::PreFlop, Kind::Raise) > 0
    }
    /// Derived from the round's calls, bets, and raises.
    pub fn pot_status(&self, round: Round) -> PotStatus {
        self.round(round)
            .iter()
            .fold(PotStatus::NoAction, |status, a| match (a.kind(), status) {
                (Kind::Call, PotStatus::NoAction) => PotStatus::Called,
                (Kind::Bet | Kind::Raise, PotStatus::NoAction | PotStatus::Called) => PotStatus::Raised,
                (Kind::Bet | Kind::Raise, PotStatus::Raised) => PotStatus::Reraised,
                (_, status) => status,
            })
    }
    /// Showdown result `seat` received for pot `pot`.
    pub fn pot_result(&self, seat: Position, pot: usize) -> Option<&Action> {
        self.iter()
            .rev()
            .find(|a| a.seat() == seat && a.kind().is_result() && a.pot() == Some(pot))
    }
    fn count(&self, round: Round, kind: Kind) -> usize {
        self.round(round).iter().filter(|a| a.kind() == kind).count()
    }
}

/// Pre-flop tendencies.
impl Ledger {
    /// Put chips in voluntarily pre-flop. Checking the big blind doesn't count.
    pub fn paid_to_play(&self, seat: Position) -> bool {
        self.round(Round::PreFlop)
            .iter()
            .any(|a| a.seat() == seat && matches!(a.kind(), Kind::Bet | Kind::Call | Kind::Raise))
    }
    /// Limpers so far; a raise resets the count.
    pub fn num_limpers(&self) -> usize {
        self.round(Round::PreFlop)
            .iter()
            .fold(0, |limpers, a| match a.kind() {
                Kind::Call => limpers + 1,
                Kind::Raise => 0,
                _ => limpers,
            })
    }
    /// First entry by `seat` in `round` other than a forced bet.
    pub fn first_voluntary_action(&self, seat: Position, round: Round) -> Option<&Action> {
        self.round(round)
            .iter()
            .find(|a| a.seat() == seat && !a.kind().is_forced())
    }
    /// Whether `seat` faced an unraised pot on its first decision.
    pub fn could_limp(&self, seat: Position) -> bool {
        let mut raised = false;
        for action in self.round(Round::PreFlop) {
            if action.seat() == seat {
                match action.kind() {
                    k if k.is_forced() => continue,
                    Kind::Check => return false,
                    _ => return !raised,
                }
            } else if action.kind() == Kind::Raise {
                raised = true;
            }
        }
        false
    }
    pub fn limped(&self, seat: Position) -> bool {
        self.could_limp(seat)
            && self
                .first_voluntary_action(seat, Round::PreFlop)
                .is_some_and(|a| a.kind() == Kind::Call)
    }
    /// Some(true) if `seat` opened the betting in `round`, Some(false) if it
    /// checked instead, None if it never had the chance.
    pub fn bet_pot(&self, seat: Position, round: Round) -> Option<bool> {
        self.round(round)
            .iter()
            .filter(|a| a.seat() == seat)
            .find_map(|a| match a.kind() {
                Kind::Check => Some(false),
                Kind::Bet => Some(true),
                _ => None,
            })
    }
    /// Some(true) if `seat` raised in `round`, Some(false) if it acted
    /// without raising, None if it never acted.
    pub fn raised_pot(&self, seat: Position, round: Round) -> Option<bool> {
        let mut acted = false;
        for action in self.round(round).iter().filter(|a| a.seat() == seat) {
            if action.kind() == Kind::Raise {
                return Some(true);
            }
            acted = true;
        }
        acted.then_some(false)
    }
    pub fn was_first_raiser_pre_flop(&self, seat: Position) -> bool {
        self.round(Round::PreFlop)
            .iter()
            .find(|a| a.kind() == Kind::Raise)
            .is_some_and(|a| a.seat() == seat)
    }
    pub fn was_last_raiser_pre_flop(&self, seat: Position) -> bool {
        self.round(Round::PreFlop)
            .iter()
            .rev()
            .find(|a| a.kind() == Kind::Raise)
            .is_some_and(|a| a.seat() == seat)
    }
    pub fn was_only_raiser_pre_flop(&self, seat: Position) -> bool {
        let mut raisers = self
            .round(Round::PreFlop)
            .iter()
            .filter(|a| a.kind() == Kind::Raise)
            .map(Action::seat)
            .peekable();
        raisers.peek().is_some() && raisers.all(|s| s == seat)
    }
    pub fn folded_pre_flop(&self, seat: Position) -> bool {
        self.round(Round::PreFlop)
            .iter()
            .any(|a| a.seat() == seat && a.kind() == Kind::Fold)
    }
    /// Whether anyone bet or raised in `round`.
    pub fn was_pot_action(&self, round: Round) -> bool {
        self.round(round).iter().any(|a| a.kind().is_aggressive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::FoldKind;

    fn wager(seat: Position, round: Round, kind: Kind, amount: Chips) -> Action {
        Action::wager(seat, round, kind, amount, false)
    }

    /// blinds 10/20 at seats 1, 2; seat 3 calls, seat 0 raises to 60,
    /// seat 1 folds, 2 and 3 call; flop: 2 bets 50, 3 raises to 150, 0 folds
    fn ledger() -> Ledger {
        Ledger::try_from(vec![
            wager(1, Round::PreFlop, Kind::SmallBlind, 10),
            wager(2, Round::PreFlop, Kind::BigBlind, 20),
            wager(3, Round::PreFlop, Kind::Call, 20),
            Action::raise(0, Round::PreFlop, 20, 40, false),
            Action::fold(1, Round::PreFlop, FoldKind::Normal),
            wager(2, Round::PreFlop, Kind::Call, 40),
            wager(3, Round::PreFlop, Kind::Call, 40),
            wager(2, Round::Flop, Kind::Bet, 50),
            Action::raise(3, Round::Flop, 50, 100, false),
            Action::fold(0, Round::Flop, FoldKind::Normal),
        ])
        .unwrap()
    }

    #[test]
    fn bets_are_per_round() {
        let ledger = ledger();
        assert!(ledger.bet(2, Round::PreFlop) == 60);
        assert!(ledger.bet(2, Round::Flop) == 50);
        assert!(ledger.current_bet(Round::PreFlop) == 60);
        assert!(ledger.current_bet(Round::Flop) == 150);
        assert!(ledger.current_bet(Round::Turn) == 0);
        assert!(ledger.wagered() == 10 + 60 + 60 + 60 + 50 + 150);
        assert!(ledger.total_through(Round::PreFlop) == 190);
        assert!(ledger.antes_blinds() == 30);
    }

    #[test]
    fn raise_sizing() {
        let ledger = ledger();
        assert!(ledger.min_raise(Round::PreFlop, 20) == 40);
        assert!(ledger.min_raise(Round::Flop, 20) == 100);
        assert!(ledger.min_raise(Round::Turn, 20) == 20);
        assert!(ledger.biggest_bet_raise(20) == 100);
    }

    #[test]
    fn acted_ignores_forced_bets() {
        let ledger = Ledger::try_from(vec![
            wager(1, Round::PreFlop, Kind::SmallBlind, 10),
            wager(2, Round::PreFlop, Kind::BigBlind, 20),
        ])
        .unwrap();
        assert!(!ledger.has_acted(2, Round::PreFlop));
        assert!(ledger.big_blind() == Some(2));
        assert!(ledger.has_acted(3, Round::PreFlop) == false);
    }

    #[test]
    fn who_did_what() {
        let ledger = ledger();
        assert!(ledger.num_raises(Round::PreFlop) == 1);
        assert!(ledger.num_callers(Round::PreFlop) == 3);
        assert!(ledger.num_prior_raises(3, Round::PreFlop) == 1);
        assert!(ledger.num_prior_raises(0, Round::PreFlop) == 0);
        assert!(ledger.fold_round(1) == Some(Round::PreFlop));
        assert!(ledger.fold_round(2).is_none());
        assert!(ledger.bettor(Round::Flop) == Some(2));
        assert!(ledger.raiser(Round::Flop) == Some(3));
        assert!(ledger.last_action_ai(3, Round::PreFlop) == Some(Kind::Call));
        assert!(ledger.last_action_ai(3, Round::Flop) == Some(Kind::Raise));
        assert!(ledger.last_action_ai(9, Round::Flop).is_none());
        assert!(ledger.num_folds_since_last_bet() == 1);
        assert!(ledger.pot_status(Round::PreFlop) == PotStatus::Raised);
        assert!(ledger.pot_status(Round::Flop) == PotStatus::Reraised);
        assert!(ledger.first_bettor(Round::Flop, |_| false) == Some(2));
        assert!(ledger.first_bettor(Round::Flop, |s| s == 2) == Some(3));
        assert!(ledger.last_bettor(Round::PreFlop, |_| false) == Some(0));
    }

    #[test]
    fn first_to_show_prefers_last_raise() {
        assert!(ledger().first_to_show() == Some(3));
        let bets = Ledger::try_from(vec![
            wager(1, Round::Flop, Kind::Bet, 20),
            wager(2, Round::Flop, Kind::Call, 20),
            wager(2, Round::Turn, Kind::Bet, 40),
            wager(1, Round::Turn, Kind::Call, 40),
            Action::check(1, Round::River),
        ])
        .unwrap();
        assert!(bets.first_to_show() == Some(2));
        assert!(Ledger::default().first_to_show().is_none());
    }

    #[test]
    fn rounds_never_go_backwards() {
        let mut ledger = ledger();
        let err = ledger.push(Action::check(2, Round::PreFlop)).unwrap_err();
        assert!(
            err.downcast_ref::<Violation>()
                == Some(&Violation::Unordered { before: Round::Flop, after: Round::PreFlop })
        );
        assert!(ledger.len() == 10);
        assert!(ledger.push(Action::check(2, Round::Turn)).is_ok());
        assert!(Ledger::try_from(vec![
            Action::check(1, Round::Flop),
            Action::check(2, Round::PreFlop),
        ])
        .is_err());
    }

    #[test]
    fn pre_flop_tendencies() {
        let ledger = ledger();
        assert!(ledger.was_raised_pre_flop());
        assert!(ledger.num_limpers() == 2);
        assert!(ledger.could_limp(3));
        assert!(ledger.limped(3));
        assert!(!ledger.could_limp(2));
        assert!(ledger.paid_to_play(3));
        assert!(!ledger.paid_to_play(1));
        assert!(ledger.was_first_raiser_pre_flop(0));
        assert!(ledger.was_last_raiser_pre_flop(0));
        assert!(ledger.was_only_raiser_pre_flop(0));
        assert!(!ledger.was_only_raiser_pre_flop(3));
        assert!(ledger.folded_pre_flop(1));
        assert!(ledger.bet_pot(2, Round::Flop) == Some(true));
        assert!(ledger.bet_pot(3, Round::Flop).is_none());
        assert!(ledger.raised_pot(3, Round::Flop) == Some(true));
        assert!(ledger.raised_pot(0, Round::Flop) == Some(false));
        assert!(ledger.raised_pot(1, Round::Flop).is_none());
        assert!(ledger.was_pot_action(Round::Flop));
        assert!(!ledger.was_pot_action(Round::Turn));
    }

    #[test]
    fn queries_do_not_mutate() {
        let ledger = ledger();
        let before = ledger.clone();
        for _ in 0..3 {
            assert!(ledger.current_bet(Round::Flop) == 150);
            assert!(ledger.min_raise(Round::Flop, 20) == 100);
        }
        assert!(ledger == before);
    }
}
