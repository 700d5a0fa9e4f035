use super::action::Action;
use super::action::FoldKind;
use super::action::Kind;
use super::event::Event;
use super::event::Listener;
use super::ledger::Ledger;
use super::order::order;
use super::partition::Stake;
use super::partition::partition;
use super::player::Player;
use super::pot::Pot;
use super::round::Round;
use super::rules::Game;
use super::rules::Rules;
use super::showdown::Mismatch;
use super::table::Table;
use super::violation::Violation;
use crate::CARDS_PER_HOLE;
use crate::Chips;
use crate::Position;
use crate::Probability;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Hole;
use crate::cards::Scorer;
use crate::cards::Standard;
use std::sync::Arc;

/// One hand of hold'em from the deal through payout.
///
/// The ledger is the only record of betting. Bets, calls, raise limits and
/// round completion are all derived from it on demand; pots are rebuilt
/// from it after every wager and checked against it for conservation.
pub struct Hand {
    pub(super) table: Table,
    pub(super) rules: Rules,
    pub(super) deck: Deck,
    pub(super) round: Round,
    pub(super) community: Vec<Card>,
    pub(super) muck: Vec<Card>,
    pub(super) order: Vec<Position>,
    pub(super) pots: Vec<Pot>,
    pub(super) ledger: Ledger,
    pub(super) current: Option<Position>,
    pub(super) all_in_showdown: bool,
    pub(super) winners: Vec<Position>,
    pub(super) losers: Vec<Position>,
    pub(super) small_blind: Option<Position>,
    pub(super) big_blind: Option<Position>,
    pub(super) scorer: Arc<dyn Scorer>,
    pub(super) listeners: Vec<Box<dyn Listener>>,
    pub(super) resolved: bool,
    pub(super) mismatches: Vec<Mismatch>,
}

impl Hand {
    /// Fresh hand over a seated table, shuffled from `seed`.
    pub fn new(mut table: Table, rules: Rules, seed: u64) -> anyhow::Result<Self> {
        rules.validate()?;
        if table.occupied() == 0 {
            return Err(Violation::EmptyTable.into());
        }
        table.players_mut().for_each(Player::end_hand);
        Ok(Self {
            table,
            rules,
            deck: Deck::shuffled(seed),
            round: Round::None,
            community: Vec::with_capacity(5),
            muck: Vec::new(),
            order: Vec::new(),
            pots: Vec::new(),
            ledger: Ledger::default(),
            current: None,
            all_in_showdown: false,
            winners: Vec::new(),
            losers: Vec::new(),
            small_blind: None,
            big_blind: None,
            scorer: Arc::new(Standard),
            listeners: Vec::new(),
            resolved: false,
            mismatches: Vec::new(),
        })
    }
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }
    pub fn listen(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }
    /// Hands the table back with updated stacks.
    pub fn into_table(self) -> Table {
        self.table
    }
}

/// Dealer transitions.
impl Hand {
    /// Shuffle up and deal: hole cards, antes, then blinds.
    pub fn deal(&mut self) -> anyhow::Result<()> {
        if self.round != Round::None {
            return Err(Violation::AlreadyDealt.into());
        }
        self.round = Round::PreFlop;
        self.order = order(&self.table, Round::PreFlop, None, false)?;
        self.deal_holes()?;
        if self.rules.ante() > 0 {
            for seat in self.order.clone() {
                self.force(seat, Kind::Ante, self.rules.ante())?;
            }
        }
        let after = self
            .table
            .next_seat_after_button()
            .ok_or(Violation::EmptyTable)?;
        let next = self.table.next_seat(after).ok_or(Violation::EmptyTable)?;
        let (small, big) = match self.order.len() {
            2 => (next, after),
            _ => (after, next),
        };
        self.force(small, Kind::SmallBlind, self.rules.small_blind())?;
        self.force(big, Kind::BigBlind, self.rules.big_blind())?;
        self.small_blind = Some(small);
        self.big_blind = Some(big);
        log::debug!("dealt {} with {} (seed {})", self.rules, self.order.len(), self.deck.seed());
        self.notify(Event::Dealer(Round::PreFlop));
        self.current_player_init();
        Ok(())
    }
    /// Closes the betting round and deals the next street.
    pub fn advance_round(&mut self) -> anyhow::Result<()> {
        if self.resolved {
            return self.fatal(Violation::AlreadyResolved);
        }
        if !self.round.is_betting() {
            return Err(Violation::OutOfRound(self.round).into());
        }
        let next = self.round.next().ok_or(Violation::OutOfRound(self.round))?;
        let carried = self
            .pots
            .last()
            .map(|pot| pot.players().any(|seat| self.is_in(seat) && self.is_all_in(seat)))
            .unwrap_or(false);
        if let Some(pot) = self.pots.last_mut() {
            pot.advance(next, carried);
        }
        if next.reveals() > 0 {
            let burn = self.draw()?;
            self.muck.push(burn);
            for _ in 0..next.reveals() {
                let card = self.draw()?;
                self.community.push(card);
            }
        }
        self.round = next;
        match next {
            Round::Flop => self.order = order(&self.table, Round::Flop, None, true)?,
            Round::Showdown => {
                self.order = order(&self.table, Round::Showdown, self.ledger.first_to_show(), true)?
            }
            _ => {}
        }
        if next != Round::Showdown
            && !self.all_in_showdown
            && self.is_done()
            && self.num_with_cards() > 1
        {
            log::debug!("all-in showdown from {}", next);
            self.all_in_showdown = true;
        }
        log::debug!("{} {}", next, self.community_string());
        self.set_current(None);
        self.notify(Event::Dealer(next));
        self.current_player_init();
        Ok(())
    }
    fn deal_holes(&mut self) -> anyhow::Result<()> {
        let start = self
            .table
            .next_seat_after_button()
            .ok_or(Violation::EmptyTable)?;
        let mut seats = Vec::with_capacity(self.table.occupied());
        let mut seat = start;
        for _ in 0..self.table.occupied() {
            seats.push(seat);
            seat = self.table.next_seat(seat).ok_or(Violation::EmptyTable)?;
        }
        let mut cards = Vec::with_capacity(seats.len() * CARDS_PER_HOLE);
        for _ in 0..CARDS_PER_HOLE * seats.len() {
            cards.push(self.draw()?);
        }
        for (i, seat) in seats.iter().enumerate() {
            let hole = Hole::from((cards[i], cards[i + seats.len()]));
            self.table
                .player_mut(*seat)
                .ok_or(Violation::UnknownSeat(*seat))?
                .deal(hole);
        }
        Ok(())
    }
    fn draw(&mut self) -> anyhow::Result<Card> {
        self.deck.draw().ok_or_else(|| {
            log::error!("deck exhausted at {}", self.round);
            Violation::DeckExhausted.into()
        })
    }
    fn force(&mut self, seat: Position, kind: Kind, chips: Chips) -> anyhow::Result<()> {
        let stack = self.player(seat)?.chips();
        let placed = chips.min(stack).max(0);
        if placed == 0 {
            return Ok(());
        }
        self.check_amount(seat, placed)?;
        let player = self.player_mut(seat)?;
        player.post(placed);
        let all_in = player.is_all_in();
        self.add_history(Action::wager(seat, self.round, kind, placed, all_in))
    }
}

/// Player actions. These record exactly what they are told; see
/// [`Hand::act`] for clamping a decision to what is legal.
impl Hand {
    pub fn fold(&mut self, seat: Position, kind: FoldKind, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        self.player_mut(seat)?.fold();
        self.add_history(Action::fold(seat, self.round, kind).with_rationale(rationale))
    }
    pub fn check(&mut self, seat: Position, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        self.add_history(Action::check(seat, self.round).with_rationale(rationale))
    }
    pub fn check_raise(&mut self, seat: Position, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        self.add_history(Action::check_raise(seat, self.round).with_rationale(rationale))
    }
    pub fn call(&mut self, seat: Position, chips: Chips, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        let all_in = self.add_to_pot(seat, chips)?;
        self.add_history(Action::wager(seat, self.round, Kind::Call, chips, all_in).with_rationale(rationale))
    }
    pub fn bet(&mut self, seat: Position, chips: Chips, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        let all_in = self.add_to_pot(seat, chips)?;
        self.add_history(Action::wager(seat, self.round, Kind::Bet, chips, all_in).with_rationale(rationale))
    }
    /// Calls `call` and raises `raise` more in one action.
    pub fn raise(&mut self, seat: Position, call: Chips, raise: Chips, rationale: Option<&str>) -> anyhow::Result<()> {
        self.live(seat)?;
        if call < 0 || raise < 0 {
            return self.fatal(Violation::NegativeAmount { seat, chips: call.min(raise) });
        }
        let all_in = self.add_to_pot(seat, call + raise)?;
        self.add_history(Action::raise(seat, self.round, call, raise, all_in).with_rationale(rationale))
    }
}

/// Bookkeeping behind every action.
impl Hand {
    pub(super) fn add_history(&mut self, action: Action) -> anyhow::Result<()> {
        log::trace!("{}", action);
        let seat = action.seat();
        let kind = action.kind();
        self.ledger.push(action.clone())?;
        if kind.is_wager() {
            self.calc_pots();
            let pots = self.total_pot();
            let wagered = self.ledger.wagered();
            if pots != wagered {
                return self.fatal(Violation::Conservation { pots, wagered });
            }
        }
        self.notify(Event::Action(action));
        if kind.is_voluntary() {
            let from = self.order.iter().position(|s| *s == seat);
            self.player_acted(from);
        }
        Ok(())
    }
    /// Validates and moves a voluntary wager from the stack.
    /// Returns whether it left the player all-in.
    fn add_to_pot(&mut self, seat: Position, chips: Chips) -> anyhow::Result<bool> {
        self.check_amount(seat, chips)?;
        let stack = self.player(seat)?.chips();
        if chips > stack {
            return self.fatal(Violation::Overdraw { seat, chips, stack });
        }
        let player = self.player_mut(seat)?;
        player.pay(chips)?;
        Ok(player.is_all_in())
    }
    fn check_amount(&self, seat: Position, chips: Chips) -> anyhow::Result<()> {
        let unit = self.table.min_chip();
        if chips < 0 {
            self.fatal(Violation::NegativeAmount { seat, chips })
        } else if chips % unit != 0 {
            self.fatal(Violation::Misaligned { seat, chips, unit })
        } else {
            Ok(())
        }
    }
    fn calc_pots(&mut self) {
        let current = self.ledger.current_bet(self.round);
        let stakes = self
            .order
            .iter()
            .map(|&seat| {
                let chips = self.ledger.contribution(seat, self.round);
                Stake::new(seat, chips, self.is_all_in(seat) && chips < current)
            })
            .collect::<Vec<_>>();
        partition(&mut self.pots, self.round, stakes);
    }
    /// Moves the turn along after `from`, the order index that just acted.
    fn player_acted(&mut self, from: Option<usize>) {
        if self.is_done() {
            self.set_current(None);
            return;
        }
        let n = self.order.len();
        let start = from.map(|i| i + 1).unwrap_or(0);
        let next = (start..start + n)
            .map(|i| self.order[i % n])
            .find(|&seat| self.can_act(seat));
        self.set_current(next);
    }
    fn set_current(&mut self, seat: Option<Position>) {
        let new = if self.round.is_betting() && !self.is_done() { seat } else { None };
        if new != self.current {
            let old = std::mem::replace(&mut self.current, new);
            self.notify(Event::CurrentPlayer { old, new });
        }
    }
    pub(super) fn notify(&mut self, event: Event) {
        for listener in self.listeners.iter_mut() {
            listener.notify(&event);
        }
    }
    pub(super) fn fatal<T>(&self, violation: Violation) -> anyhow::Result<T> {
        log::error!("{}", violation);
        Err(violation.into())
    }
}

/// Seat lookups.
impl Hand {
    pub fn player(&self, seat: Position) -> anyhow::Result<&Player> {
        self.table
            .player(seat)
            .ok_or_else(|| Violation::UnknownSeat(seat).into())
    }
    pub(super) fn player_mut(&mut self, seat: Position) -> anyhow::Result<&mut Player> {
        self.table
            .player_mut(seat)
            .ok_or_else(|| Violation::UnknownSeat(seat).into())
    }
    /// A player holding cards who has not folded.
    fn live(&self, seat: Position) -> anyhow::Result<&Player> {
        if self.resolved {
            return self.fatal(Violation::AlreadyResolved);
        }
        if !self.round.is_betting() {
            return self.fatal(Violation::OutOfRound(self.round));
        }
        match self.table.player(seat) {
            Some(player) if !player.is_folded() && player.cards().is_some() => Ok(player),
            _ => self.fatal(Violation::NotInHand(seat)),
        }
    }
    pub(super) fn is_in(&self, seat: Position) -> bool {
        self.table
            .player(seat)
            .is_some_and(|p| !p.is_folded() && p.cards().is_some())
    }
    fn is_all_in(&self, seat: Position) -> bool {
        self.table.player(seat).is_some_and(Player::is_all_in)
    }
    fn can_act(&self, seat: Position) -> bool {
        self.is_in(seat) && !self.is_all_in(seat)
    }
}

/// Betting queries.
impl Hand {
    /// Whether the current betting round is over.
    pub fn is_done(&self) -> bool {
        if !self.round.is_betting() || self.is_uncontested() {
            return true;
        }
        let mut to_act = 0;
        let mut acted = 0;
        let mut all_in = 0;
        for &seat in self.order.iter().filter(|&&s| self.is_in(s)) {
            to_act += 1;
            if self.ledger.has_acted(seat, self.round) {
                acted += 1;
            } else if self.is_all_in(seat) {
                match self.round {
                    Round::PreFlop => acted += 1,
                    _ => all_in += 1,
                }
            } else if self.amount_to_call(seat) == 0 && self.max_raise(seat) == 0 {
                acted += 1;
            }
        }
        if acted == 0 && self.num_with_chips() <= 1 {
            return true;
        }
        to_act == acted + all_in && self.is_pot_good()
    }
    /// Everyone with chips behind has matched the current bet.
    pub fn is_pot_good(&self) -> bool {
        let current = self.current_bet();
        self.order
            .iter()
            .filter(|&&seat| self.can_act(seat))
            .all(|&seat| self.ledger.bet(seat, self.round) == current)
    }
    pub fn current_bet(&self) -> Chips {
        self.ledger.current_bet(self.round)
    }
    /// Chips `seat` must add to stay in, never more than its stack.
    ///
    /// A player who has put nothing in this round never calls less than one
    /// minimum bet while someone else can still cover it. This keeps a short
    /// all-in big blind from setting a sub-minimum price.
    pub fn amount_to_call(&self, seat: Position) -> Chips {
        let Some(player) = self.table.player(seat) else {
            return 0;
        };
        let bet = self.ledger.bet(seat, self.round);
        let mut call = self.current_bet() - bet;
        let min = self.min_bet();
        if call > 0 && call < min && bet == 0 {
            call = min.min(self.max_chips_other_players(seat, true, false));
        }
        call.min(player.chips())
    }
    /// Big blind, doubled on the turn and river in fixed-limit.
    pub fn min_bet(&self) -> Chips {
        match (self.rules.game(), self.round) {
            (Game::FixedLimit, Round::Turn | Round::River) => self.rules.big_blind() * 2,
            _ => self.rules.big_blind(),
        }
    }
    /// Most `seat` may open for.
    pub fn max_bet(&self, seat: Position) -> Chips {
        let chips = self.table.player(seat).map(Player::chips).unwrap_or(0);
        let max = match self.rules.game() {
            Game::NoLimit => chips,
            Game::PotLimit => self.total_pot().max(self.min_bet()).min(chips),
            Game::FixedLimit => self.min_bet().min(chips),
        };
        max.min(self.max_chips_other_players(seat, false, false))
    }
    pub fn min_raise(&self) -> Chips {
        self.ledger.min_raise(self.round, self.min_bet())
    }
    /// Most `seat` may raise on top of its call. Zero when no raise is legal.
    pub fn max_raise(&self, seat: Position) -> Chips {
        if self.rules.game() == Game::FixedLimit
            && self.rules.max_raises(self.num_with_cards()) <= self.ledger.num_raises(self.round)
        {
            return 0;
        }
        let chips = self.table.player(seat).map(Player::chips).unwrap_or(0);
        let call = self.amount_to_call(seat);
        let left = chips - call;
        if left <= 0 {
            return 0;
        }
        let max = match self.rules.game() {
            Game::NoLimit => left,
            Game::PotLimit => (self.total_pot() + call).max(self.min_bet()).min(left),
            Game::FixedLimit => self.min_bet().min(left),
        };
        max.min(self.max_chips_other_players(seat, false, true))
    }
    /// Largest amount any other live player could still put in, optionally
    /// counting their bet this round and net of what they owe.
    pub fn max_chips_other_players(&self, seat: Position, add_current_bet: bool, subtract_call: bool) -> Chips {
        self.order
            .iter()
            .filter(|&&other| other != seat && self.is_in(other))
            .filter_map(|&other| self.table.player(other).map(|p| (other, p.chips())))
            .map(|(other, chips)| {
                let bet = if add_current_bet { self.ledger.bet(other, self.round) } else { 0 };
                let call = if subtract_call { self.amount_to_call(other) } else { 0 };
                chips + bet - call
            })
            .max()
            .unwrap_or(0)
    }
    /// Percentage of the final pot that calling would cost. An all-in call
    /// only counts what it can win from each opponent.
    pub fn pot_odds(&self, seat: Position) -> Probability {
        let call = self.amount_to_call(seat);
        let chips = self.table.player(seat).map(Player::chips).unwrap_or(0);
        let pot = if call == chips {
            let mine = self.ledger.total(seat);
            let cover = mine + call;
            mine + self
                .order
                .iter()
                .filter(|&&other| other != seat)
                .map(|&other| self.ledger.total(other).min(cover))
                .sum::<Chips>()
        } else {
            self.total_pot()
        };
        match call + pot {
            0 => 0.,
            total => 100. * call as Probability / total as Probability,
        }
    }
}

/// Table and round state.
impl Hand {
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn seed(&self) -> u64 {
        self.deck.seed()
    }
    pub fn order(&self) -> &[Position] {
        &self.order
    }
    /// 1-based place of `seat` in the current order.
    pub fn position(&self, seat: Position) -> Option<usize> {
        self.order.iter().position(|s| *s == seat).map(|i| i + 1)
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn muck(&self) -> &[Card] {
        &self.muck
    }
    pub fn current_player(&self) -> Option<Position> {
        self.current
    }
    /// Seats the first player to act if nobody is, and returns the seat to act.
    pub fn current_player_init(&mut self) -> Option<Position> {
        if self.current.is_none() {
            self.player_acted(None);
        }
        self.current
    }
    pub fn is_uncontested(&self) -> bool {
        self.num_with_cards() == 1
    }
    pub fn is_all_in_showdown(&self) -> bool {
        self.all_in_showdown
    }
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
    /// Players still holding cards.
    pub fn num_with_cards(&self) -> usize {
        self.table
            .players()
            .filter(|p| self.is_in(p.seat()))
            .count()
    }
    /// Players still holding cards with chips behind.
    pub fn num_with_chips(&self) -> usize {
        self.table
            .players()
            .filter(|p| self.can_act(p.seat()))
            .count()
    }
    pub fn small_blind_seat(&self) -> Option<Position> {
        self.small_blind
    }
    pub fn big_blind_seat(&self) -> Option<Position> {
        self.big_blind
    }
    pub fn winners(&self) -> &[Position] {
        &self.winners
    }
    pub fn losers(&self) -> &[Position] {
        &self.losers
    }
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }
    pub fn total_pot(&self) -> Chips {
        self.pots.iter().map(Pot::chips).sum()
    }
    pub fn num_pots_excluding_overbets(&self) -> usize {
        self.pots.iter().filter(|pot| !pot.is_overbet()).count()
    }
    pub fn pot(&self, index: usize) -> Option<&Pot> {
        self.pots.get(index)
    }
    /// Point-in-time copy of the pots.
    pub fn pots(&self) -> Vec<Pot> {
        self.pots.clone()
    }
    /// Point-in-time copy of the ledger.
    pub fn history(&self) -> Ledger {
        self.ledger.clone()
    }
}

/// Display projections. In an all-in showdown these run a street behind
/// the dealt cards so an interface can turn them one at a time.
impl Hand {
    pub fn community_for_display(&self) -> &[Card] {
        match (self.all_in_showdown, self.round) {
            (true, Round::Flop) => &[],
            (true, Round::Turn | Round::River) => &self.community[..self.community.len() - 1],
            _ => &self.community,
        }
    }
    pub fn round_for_display(&self) -> Round {
        match (self.all_in_showdown, self.round) {
            (true, Round::Flop | Round::Turn | Round::River) => self.round.previous(),
            (_, round) => round,
        }
    }
    fn community_string(&self) -> String {
        self.community
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Hand")
            .field("round", &self.round)
            .field("community", &self.community)
            .field("order", &self.order)
            .field("current", &self.current)
            .field("pots", &self.pots)
            .field("ledger", &self.ledger.len())
            .field("all_in_showdown", &self.all_in_showdown)
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} {} [{}]", self.rules, self.round, self.community_string())?;
        write!(f, "{}", self.table)?;
        for pot in self.pots.iter() {
            writeln!(f, "{}", pot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Score;
    use std::sync::mpsc;

    /// Scores one hole above every other.
    struct Favor(Hole);
    impl Scorer for Favor {
        fn score(&self, hole: Hole, _: &[Card]) -> Score {
            if hole == self.0 { 2 } else { 1 }
        }
    }

    fn table(stacks: &[(Position, Chips)], button: Position) -> Table {
        let mut table = Table::default();
        for &(seat, chips) in stacks {
            table.sit(Player::new(seat, format!("p{}", seat), chips)).unwrap();
        }
        table.set_button(button).unwrap();
        table
    }

    fn dealt(stacks: &[(Position, Chips)], button: Position, rules: Rules) -> Hand {
        let mut hand = Hand::new(table(stacks, button), rules, 5).unwrap();
        hand.deal().unwrap();
        hand
    }

    #[test]
    fn heads_up_hand_end_to_end() {
        let mut hand = dealt(&[(0, 1000), (1, 1000)], 0, Rules::no_limit(10, 20));
        assert!(hand.small_blind_seat() == Some(0));
        assert!(hand.big_blind_seat() == Some(1));
        assert!(hand.current_player() == Some(0));
        hand.call(0, 10, None).unwrap();
        assert!(!hand.is_done());
        hand.check(1, None).unwrap();
        assert!(hand.is_done());
        hand.advance_round().unwrap();
        assert!(hand.community().len() == 3);
        assert!(hand.muck().len() == 1);
        assert!(hand.current_player() == Some(1));
        hand.check(1, None).unwrap();
        hand.check(0, None).unwrap();
        hand.advance_round().unwrap();
        hand.bet(1, 40, None).unwrap();
        assert!(hand.amount_to_call(0) == 40);
        hand.call(0, 40, None).unwrap();
        assert!(hand.is_done());
        hand.advance_round().unwrap();
        hand.check(1, None).unwrap();
        hand.check(0, None).unwrap();
        hand.advance_round().unwrap();
        assert!(hand.round() == Round::Showdown);
        assert!(hand.community().len() == 5);
        assert!(hand.pots().len() == 1);
        assert!(hand.total_pot() == 120);

        let favorite = hand.player(1).unwrap().cards().unwrap();
        let mut hand = hand.with_scorer(Arc::new(Favor(favorite)));
        hand.resolve().unwrap();
        assert!(hand.player(1).unwrap().chips() == 1060);
        assert!(hand.player(0).unwrap().chips() == 940);
        assert!(hand.history().win(1) == 120);
        assert!(hand.history().paid() == hand.history().wagered());
        assert!(hand.mismatches().is_empty());
        assert!(hand.pot(0).unwrap().winners() == [1]);
    }

    #[test]
    fn done_only_once_everyone_matches() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 500)], 0, Rules::no_limit(10, 20));
        assert!(!hand.is_done());
        hand.raise(0, 20, 40, None).unwrap();
        assert!(!hand.is_done());
        hand.call(1, 50, None).unwrap();
        assert!(!hand.is_done());
        assert!(hand.current_player() == Some(2));
        hand.call(2, 40, None).unwrap();
        assert!(hand.is_done());
        assert!(hand.is_done());
        assert!(hand.current_player().is_none());
        assert!(hand.is_pot_good());
    }

    #[test]
    fn big_blind_keeps_option() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 500)], 0, Rules::no_limit(10, 20));
        hand.call(0, 20, None).unwrap();
        hand.call(1, 10, None).unwrap();
        assert!(hand.is_pot_good());
        assert!(!hand.is_done());
        assert!(hand.current_player() == Some(2));
        hand.check(2, None).unwrap();
        assert!(hand.is_done());
    }

    #[test]
    fn short_big_blind_still_prices_a_full_bet() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 15)], 0, Rules::no_limit(10, 20));
        assert!(hand.player(2).unwrap().is_all_in());
        assert!(hand.current_bet() == 15);
        assert!(hand.amount_to_call(0) == 20);
        hand.call(0, 20, None).unwrap();
        assert!(hand.amount_to_call(1) == 10);
        assert!(hand.pots().len() == 2);
        assert!(hand.pot(0).unwrap().chips() == 40);
        assert!(hand.pot(1).unwrap().chips() == 5);
    }

    #[test]
    fn sub_minimum_call_is_the_same_in_every_structure() {
        for rules in [Rules::no_limit(10, 20), Rules::pot_limit(10, 20), Rules::fixed_limit(10, 20)] {
            let mut hand = dealt(&[(0, 500), (1, 500), (2, 15)], 0, rules);
            assert!(hand.amount_to_call(0) == 20);
            hand.call(0, 20, None).unwrap();
            assert!(hand.amount_to_call(1) == 10);
            assert!(hand.pots().iter().map(Pot::chips).collect::<Vec<_>>() == vec![40, 5]);
        }
    }

    #[test]
    fn sub_minimum_call_never_exceeds_what_others_can_cover() {
        let hand = dealt(&[(0, 500), (1, 12), (2, 15)], 0, Rules::no_limit(10, 20));
        assert!(hand.player(1).unwrap().chips() == 2);
        assert!(hand.amount_to_call(0) == 15);
    }

    #[test]
    fn pot_limit_raises_the_pot() {
        let mut hand = dealt(&[(0, 1000), (1, 1000), (2, 1000)], 0, Rules::pot_limit(10, 20));
        assert!(hand.max_bet(0) == 30);
        assert!(hand.max_raise(0) == 30 + 20);
        hand.raise(0, 20, 50, None).unwrap();
        assert!(hand.amount_to_call(1) == 60);
        assert!(hand.max_raise(1) == 100 + 60);
        let short = dealt(&[(0, 60), (1, 1000), (2, 1000)], 0, Rules::pot_limit(10, 20));
        assert!(short.max_raise(0) == 40);
    }

    #[test]
    fn fixed_limit_doubles_on_the_turn() {
        let mut hand = dealt(&[(0, 1000), (1, 1000)], 0, Rules::fixed_limit(10, 20));
        assert!(hand.min_bet() == 20);
        hand.call(0, 10, None).unwrap();
        hand.check(1, None).unwrap();
        hand.advance_round().unwrap();
        assert!(hand.min_bet() == 20);
        assert!(hand.max_bet(1) == 20);
        hand.check(1, None).unwrap();
        hand.check(0, None).unwrap();
        hand.advance_round().unwrap();
        assert!(hand.min_bet() == 40);
        assert!(hand.max_bet(1) == 40);
        assert!(hand.min_raise() == 40);
        hand.bet(1, 40, None).unwrap();
        assert!(hand.max_raise(0) == 40);
        hand.call(0, 40, None).unwrap();
        hand.advance_round().unwrap();
        assert!(hand.round() == Round::River);
        assert!(hand.min_bet() == 40);
    }

    #[test]
    fn limits_stop_at_what_opponents_can_match() {
        let hand = dealt(&[(0, 1000), (1, 200), (2, 300)], 0, Rules::no_limit(10, 20));
        assert!(hand.max_chips_other_players(0, false, false) == 280);
        assert!(hand.max_chips_other_players(0, false, true) == 280);
        assert!(hand.max_chips_other_players(0, true, false) == 300);
        assert!(hand.max_bet(0) == 280);
        assert!(hand.max_raise(0) == 280);
        let hand = dealt(&[(0, 1000), (1, 30), (2, 60)], 0, Rules::pot_limit(10, 20));
        assert!(hand.max_raise(0) == 40);
    }

    #[test]
    fn nothing_moves_after_resolution() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 500)], 0, Rules::no_limit(10, 20));
        hand.fold(0, FoldKind::Normal, None).unwrap();
        hand.fold(1, FoldKind::Normal, None).unwrap();
        hand.resolve().unwrap();
        assert!(hand.player(2).unwrap().chips() == 510);
        let resolved = |err: anyhow::Error| {
            err.downcast_ref::<Violation>() == Some(&Violation::AlreadyResolved)
        };
        assert!(resolved(hand.bet(2, 100, None).unwrap_err()));
        assert!(resolved(hand.call(2, 20, None).unwrap_err()));
        assert!(resolved(hand.raise(2, 0, 40, None).unwrap_err()));
        assert!(resolved(hand.check(2, None).unwrap_err()));
        assert!(resolved(hand.fold(2, FoldKind::Normal, None).unwrap_err()));
        assert!(resolved(hand.advance_round().unwrap_err()));
        assert!(hand.round() == Round::PreFlop);
        assert!(hand.player(2).unwrap().chips() == 510);
        assert!(hand.history().paid() == hand.history().wagered());
    }

    #[test]
    fn wagers_are_validated() {
        let mut table = table(&[(0, 100), (1, 100)], 0);
        table.set_min_chip(5).unwrap();
        let mut hand = Hand::new(table, Rules::no_limit(5, 10), 5).unwrap();
        hand.deal().unwrap();
        let err = hand.call(0, -5, None).unwrap_err();
        assert!(matches!(err.downcast_ref::<Violation>(), Some(Violation::NegativeAmount { .. })));
        let err = hand.call(0, 7, None).unwrap_err();
        assert!(matches!(err.downcast_ref::<Violation>(), Some(Violation::Misaligned { unit: 5, .. })));
        let err = hand.bet(0, 500, None).unwrap_err();
        assert!(
            err.downcast_ref::<Violation>()
                == Some(&Violation::Overdraw { seat: 0, chips: 500, stack: 95 })
        );
        assert!(hand.ledger().len() == 2);
        assert!(hand.player(0).unwrap().chips() == 95);
    }

    #[test]
    fn lifecycle_errors() {
        let mut hand = dealt(&[(0, 100), (1, 100)], 0, Rules::default());
        let err = hand.deal().unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::AlreadyDealt));
        let err = hand.check(5, None).unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::NotInHand(5)));
        let err = Hand::new(Table::default(), Rules::default(), 1).unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::EmptyTable));
        let mut idle = Hand::new(table(&[(0, 100)], 0), Rules::default(), 1).unwrap();
        let err = idle.advance_round().unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::OutOfRound(Round::None)));
    }

    #[test]
    fn seed_reproduces_the_deal() {
        let a = dealt(&[(0, 100), (3, 100), (7, 100)], 3, Rules::default());
        let b = dealt(&[(0, 100), (3, 100), (7, 100)], 3, Rules::default());
        for seat in [0, 3, 7] {
            assert!(a.player(seat).unwrap().cards() == b.player(seat).unwrap().cards());
        }
        assert!(a.seed() == 5);
    }

    #[test]
    fn antes_come_before_blinds() {
        let hand = dealt(&[(0, 3), (1, 100), (2, 100)], 0, Rules::no_limit(10, 20).with_ante(5));
        let kinds = hand.history().iter().map(Action::kind).collect::<Vec<_>>();
        assert!(kinds == vec![Kind::Ante, Kind::Ante, Kind::Ante, Kind::SmallBlind, Kind::BigBlind]);
        assert!(hand.ledger().ante(0, Round::PreFlop) == 3);
        assert!(hand.ledger().antes_blinds() == 3 + 5 + 5 + 10 + 20);
        assert!(hand.total_pot() == 43);
        assert!(hand.pot(0).unwrap().chips() == 9);
        assert!(hand.current_player() == Some(1));
    }

    #[test]
    fn events_follow_mutations() {
        let (tx, rx) = mpsc::channel();
        let mut hand = Hand::new(table(&[(0, 100), (1, 100)], 0), Rules::default(), 5).unwrap();
        hand.listen(Box::new(tx));
        hand.deal().unwrap();
        hand.fold(0, FoldKind::Normal, Some("weak")).unwrap();
        let events = rx.try_iter().collect::<Vec<_>>();
        assert!(matches!(events[0], Event::Action(ref a) if a.kind() == Kind::SmallBlind));
        assert!(matches!(events[1], Event::Action(ref a) if a.kind() == Kind::BigBlind));
        assert!(events[2] == Event::Dealer(Round::PreFlop));
        assert!(events[3] == Event::CurrentPlayer { old: None, new: Some(0) });
        assert!(matches!(events[4], Event::Action(ref a) if a.rationale() == Some("weak")));
        assert!(events[5] == Event::CurrentPlayer { old: Some(0), new: None });
    }

    #[test]
    fn queries_are_idempotent() {
        let mut hand = dealt(&[(0, 500), (1, 500), (2, 500)], 0, Rules::no_limit(10, 20));
        hand.raise(0, 20, 40, None).unwrap();
        let before = (hand.current_bet(), hand.min_raise(), hand.amount_to_call(1), hand.max_raise(1));
        for _ in 0..3 {
            assert!(before == (hand.current_bet(), hand.min_raise(), hand.amount_to_call(1), hand.max_raise(1)));
        }
        assert!(before == (60, 40, 50, 440));
        assert!(hand.position(0) == Some(1));
        assert!(hand.position(9).is_none());
    }

    #[test]
    fn pot_odds_count_only_what_can_be_won() {
        let mut hand = dealt(&[(0, 500), (1, 500)], 0, Rules::no_limit(10, 20));
        assert!(hand.pot_odds(0) == 100. * 10. / 40.);
        hand.raise(0, 10, 80, None).unwrap();
        assert!(hand.max_bet(1) == 400);
        hand.call(1, 80, None).unwrap();
        assert!(hand.pot_odds(1) == 0.);
    }
}
