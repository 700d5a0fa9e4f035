use super::pot::Pot;
use super::round::Round;
use crate::Chips;
use crate::Position;

/// What one seat has in front of it this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stake {
    pub seat: Position,
    pub chips: Chips,
    /// All-in for less than the current bet.
    pub short: bool,
}

impl Stake {
    pub fn new(seat: Position, chips: Chips, short: bool) -> Self {
        Self { seat, chips, short }
    }
}

/// Re-splits this round's chips into the main pot and side pots.
///
/// Pots from earlier rounds are left alone. The pot the round opened on is
/// reset to its carried base, every pot created since is dropped, and the
/// round's stakes are distributed again from scratch. Each all-in short of
/// the current bet caps the pot it lands in at what it could match and
/// opens a new pot above it. Chips beyond every cap go to the newest pot.
pub fn partition(pots: &mut Vec<Pot>, round: Round, mut stakes: Vec<Stake>) {
    let first = pots
        .iter()
        .rposition(|pot| pot.round() != round)
        .map(|i| i + 1)
        .unwrap_or(0);
    match pots.get_mut(first) {
        Some(pot) => {
            pot.reset();
            pots.truncate(first + 1);
        }
        None => pots.push(Pot::new(round, 0)),
    }
    stakes.sort_by_key(|stake| (!stake.short, stake.chips));

    let mut last_side = 0;
    for (i, stake) in stakes.iter().enumerate() {
        if !stake.short {
            continue;
        }
        let Some(pot) = pots.last_mut() else {
            break;
        };
        let zero_base = i == 0 && pot.has_base_all_in() && stake.chips == 0;
        if zero_base || stake.chips > last_side {
            pot.cap_at(stake.chips - last_side);
            pots.push(Pot::new(round, i + 1));
            last_side = stake.chips;
        }
    }

    for pot in pots[first..].iter_mut() {
        for stake in stakes.iter_mut().filter(|stake| stake.chips > 0) {
            match pot.cap() {
                None => {
                    pot.add(stake.seat, stake.chips);
                    stake.chips = 0;
                }
                Some(cap) => {
                    let chips = cap.min(stake.chips);
                    pot.add(stake.seat, chips);
                    stake.chips -= chips;
                }
            }
        }
    }
    log::trace!("{} pots {}", round, pots.iter().map(Pot::to_string).collect::<Vec<_>>().join(" | "));
}
