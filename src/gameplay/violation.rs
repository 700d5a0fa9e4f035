use super::round::Round;
use crate::Chips;
use crate::Position;

/// Fatal accounting or usage errors.
///
/// These mean the engine or its driver has a bug. They surface as
/// `anyhow::Error` and can be recovered with `downcast_ref::<Violation>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    NegativeAmount { seat: Position, chips: Chips },
    Misaligned { seat: Position, chips: Chips, unit: Chips },
    Overdraw { seat: Position, chips: Chips, stack: Chips },
    Conservation { pots: Chips, wagered: Chips },
    EmptyTable,
    SeatTaken(Position),
    UnknownSeat(Position),
    NotInHand(Position),
    OutOfRound(Round),
    CallOwed { seat: Position, call: Chips },
    RaiseTooSmall { seat: Position, raise: Chips, min: Chips },
    NoWinner { pot: usize },
    DeckExhausted,
    AlreadyDealt,
    AlreadyResolved,
    InvalidRules(String),
    ChipUnit(Chips),
    Unordered { before: Round, after: Round },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NegativeAmount { seat, chips } => {
                write!(f, "seat {} wagered negative amount {}", seat, chips)
            }
            Self::Misaligned { seat, chips, unit } => {
                write!(f, "seat {} wagered {} not a multiple of {}", seat, chips, unit)
            }
            Self::Overdraw { seat, chips, stack } => {
                write!(f, "seat {} wagered {} with only {} behind", seat, chips, stack)
            }
            Self::Conservation { pots, wagered } => {
                write!(f, "pot amount ({}) doesn't equal wagered ({})", pots, wagered)
            }
            Self::EmptyTable => write!(f, "no occupied seats"),
            Self::SeatTaken(seat) => write!(f, "seat {} is taken", seat),
            Self::UnknownSeat(seat) => write!(f, "seat {} is empty or out of range", seat),
            Self::NotInHand(seat) => write!(f, "seat {} is not live in this hand", seat),
            Self::OutOfRound(round) => write!(f, "action not allowed during {}", round),
            Self::CallOwed { seat, call } => write!(f, "seat {} owes {} to call", seat, call),
            Self::RaiseTooSmall { seat, raise, min } => {
                write!(f, "seat {} raised {} below minimum {}", seat, raise, min)
            }
            Self::NoWinner { pot } => write!(f, "no winners for pot {}", pot),
            Self::DeckExhausted => write!(f, "deck exhausted"),
            Self::AlreadyDealt => write!(f, "hand already dealt"),
            Self::AlreadyResolved => write!(f, "hand already resolved"),
            Self::InvalidRules(why) => write!(f, "invalid rules: {}", why),
            Self::ChipUnit(chips) => write!(f, "chip unit {} must be positive", chips),
            Self::Unordered { before, after } => {
                write!(f, "{} action recorded after {}", after, before)
            }
        }
    }
}

impl std::error::Error for Violation {}
