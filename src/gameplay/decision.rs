use super::action::FoldKind;
use super::hand::Hand;
use super::violation::Violation;
use crate::Chips;
use crate::Position;
use serde::Deserialize;
use serde::Serialize;

/// What a player wants to do, before it is fitted to the table limits.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Fold,
    Check,
    Call,
    /// Open for this many chips.
    Bet(Chips),
    /// Raise this many chips on top of the call.
    Raise(Chips),
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet(chips) => write!(f, "bet {}", chips),
            Self::Raise(chips) => write!(f, "raise {}", chips),
        }
    }
}

impl Hand {
    /// Applies `decision` for `seat`, fitted to what is legal right now.
    /// Returns the decision actually recorded.
    pub fn act(&mut self, seat: Position, decision: Decision, rationale: Option<&str>) -> anyhow::Result<Decision> {
        let chips = self.player(seat)?.chips();
        let call = self.amount_to_call(seat);
        match decision {
            Decision::Fold => {
                self.fold(seat, FoldKind::Normal, rationale)?;
                Ok(Decision::Fold)
            }
            Decision::Check if call > 0 => self.fatal(Violation::CallOwed { seat, call }),
            Decision::Check => {
                self.check(seat, rationale)?;
                Ok(Decision::Check)
            }
            Decision::Call if call == 0 => self.act(seat, Decision::Check, rationale),
            Decision::Call => {
                self.call(seat, call.min(chips), rationale)?;
                Ok(Decision::Call)
            }
            Decision::Bet(_) if call > 0 => self.fatal(Violation::CallOwed { seat, call }),
            Decision::Bet(bet) => match bet.min(chips).min(self.max_bet(seat)) {
                bet if bet <= 0 => self.act(seat, Decision::Check, rationale),
                bet => {
                    self.bet(seat, bet, rationale)?;
                    Ok(Decision::Bet(bet))
                }
            },
            Decision::Raise(_) if call >= chips => self.act(seat, Decision::Call, rationale),
            Decision::Raise(raise) if call == 0 && self.ledger.bet(seat, self.round) == 0 => {
                self.act(seat, Decision::Bet(raise), rationale)
            }
            Decision::Raise(raise) => {
                let left = chips - call;
                let max = self.max_raise(seat);
                let min = self.min_raise();
                let raise = raise.min(left).min(max);
                if raise < min && raise < left && raise < max && raise > 0 {
                    return self.fatal(Violation::RaiseTooSmall { seat, raise, min });
                }
                if raise <= 0 {
                    return self.act(seat, Decision::Call, rationale);
                }
                self.raise(seat, call, raise, rationale)?;
                Ok(Decision::Raise(raise))
            }
        }
    }
}
