use super::action::Action;
use super::action::Kind;
use super::event::Event;
use super::hand::Hand;
use super::order::order;
use super::round::Round;
use super::violation::Violation;
use crate::Chips;
use crate::Position;
use crate::cards::Score;
use serde::Serialize;

/// A pot whose payouts did not add up to its chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub pot: usize,
    pub chips: Chips,
    pub paid: Chips,
}

/// What one pot pays, settled before any chips move.
struct Payout {
    pot: usize,
    chips: Chips,
    kind: Kind,
    seats: Vec<Position>,
    exposed: Vec<Position>,
    winners: Vec<Position>,
    shares: Vec<Chips>,
}

/// Splits `chips` evenly among `n` winners in whole `unit`s.
/// Leftover units go one apiece from the front.
pub fn split(chips: Chips, n: usize, unit: Chips) -> Vec<Chips> {
    if n == 0 {
        return Vec::new();
    }
    let share = chips / n as Chips;
    let share = share - share % unit;
    let mut remainder = chips - share * n as Chips;
    if remainder % unit != 0 {
        log::warn!("remainder {} of {} is not a multiple of {}", remainder, chips, unit);
    }
    (0..n)
        .map(|_| {
            let extra = unit.min(remainder).max(0);
            remainder -= extra;
            share + extra
        })
        .collect()
}

impl Hand {
    /// Puts the table in reveal order and, if asked, sorts live players
    /// into those who must show and those who may muck.
    pub fn pre_resolve(&mut self, classify: bool) -> anyhow::Result<()> {
        self.order = order(&self.table, Round::Showdown, self.ledger.first_to_show(), true)?;
        if !classify {
            return Ok(());
        }
        let mut winners = Vec::new();
        let mut losers = Vec::new();
        for pot in self.pots.iter() {
            let mut high = 0;
            let mut best = Vec::new();
            for &seat in self.order.iter().filter(|&&s| self.is_in(s) && pot.contains(s)) {
                let score = self.score(seat);
                if score >= high {
                    if score > high {
                        best.clear();
                    }
                    high = score;
                    best.push(seat);
                } else if !self.all_in_showdown {
                    losers.push(seat);
                }
            }
            winners.extend(best);
        }
        self.winners.clear();
        self.losers.clear();
        for seat in winners {
            if !self.winners.contains(&seat) {
                self.winners.push(seat);
            }
        }
        for seat in losers {
            if !self.losers.contains(&seat) {
                self.losers.push(seat);
            }
        }
        log::debug!("must show {:?} may muck {:?}", self.winners, self.losers);
        Ok(())
    }

    /// Pays every pot to its best hands.
    ///
    /// Allowed at showdown, or earlier once a single player holds cards, in
    /// which case that player takes everything unscored. Ties split in whole
    /// chip units, with odd units going to winners nearest the button.
    pub fn resolve(&mut self) -> anyhow::Result<()> {
        if self.resolved {
            return self.fatal(Violation::AlreadyResolved);
        }
        let uncontested = self.is_uncontested();
        if self.round != Round::Showdown && !uncontested {
            return self.fatal(Violation::OutOfRound(self.round));
        }
        let reveal = order(&self.table, Round::Showdown, self.ledger.first_to_show(), true)?;
        let flop = order(&self.table, Round::Flop, None, true)?;
        let unit = self.table.min_chip();
        let mut payouts = Vec::with_capacity(self.pots.len());
        for (index, pot) in self.pots.iter().enumerate() {
            let scores = reveal
                .iter()
                .copied()
                .filter(|&seat| self.is_in(seat) && pot.contains(seat))
                .map(|seat| match uncontested {
                    true => (seat, Score::MAX),
                    false => (seat, self.score(seat)),
                })
                .collect::<Vec<(Position, Score)>>();

            let mut high = 0;
            let mut exposed = Vec::new();
            for &(seat, score) in scores.iter() {
                let player = self.player(seat)?;
                let show = if score >= high {
                    high = score;
                    !uncontested || player.is_show_winning()
                } else {
                    !player.is_muck_losing()
                };
                if show || self.all_in_showdown {
                    exposed.push(seat);
                }
            }
            if high == 0 {
                return self.fatal(Violation::NoWinner { pot: index });
            }

            let winners = flop
                .iter()
                .copied()
                .filter(|seat| scores.contains(&(*seat, high)))
                .collect::<Vec<_>>();
            let shares = split(pot.chips(), winners.len(), unit);
            payouts.push(Payout {
                pot: index,
                chips: pot.chips(),
                kind: if pot.is_overbet() { Kind::Overbet } else { Kind::Win },
                seats: scores.into_iter().map(|(seat, _)| seat).collect(),
                exposed,
                winners,
                shares,
            });
        }

        // every pot has a winner, so chips can move now
        for payout in payouts {
            log::debug!("pot {} ${} to {:?} as {:?}", payout.pot, payout.chips, payout.winners, payout.shares);
            for &seat in payout.exposed.iter() {
                self.player_mut(seat)?.expose();
            }
            self.pots[payout.pot].award(payout.winners.clone());
            let mut paid = 0;
            for &seat in payout.seats.iter() {
                let action = match payout.winners.iter().position(|w| *w == seat) {
                    Some(i) => {
                        let amount = payout.shares[i];
                        paid += amount;
                        self.player_mut(seat)?.win(amount);
                        Action::result(seat, self.round, payout.kind, amount, payout.pot)
                    }
                    None => Action::result(seat, self.round, Kind::Lose, 0, payout.pot),
                };
                self.add_history(action)?;
            }
            if paid != payout.chips {
                log::warn!("pot {} holds {} but paid {}", payout.pot, payout.chips, paid);
                self.mismatches.push(Mismatch {
                    pot: payout.pot,
                    chips: payout.chips,
                    paid,
                });
            }
        }
        self.resolved = true;
        self.notify(Event::Resolved);
        Ok(())
    }

    fn score(&self, seat: Position) -> Score {
        self.table
            .player(seat)
            .and_then(|player| player.cards())
            .map(|hole| self.scorer.score(hole, &self.community))
            .unwrap_or(0)
    }
}
