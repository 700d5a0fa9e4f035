use super::round::Round;
use crate::Chips;
use crate::Position;
use colored::Colorize;
use serde::Serialize;

/// What happened in one ledger entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum Kind {
    Ante,
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    CheckRaise,
    Call,
    Bet,
    Raise,
    Win,
    Lose,
    Overbet,
}

impl Kind {
    /// Moves chips from a player into the pots.
    pub fn is_wager(&self) -> bool {
        matches!(
            self,
            Self::Ante | Self::SmallBlind | Self::BigBlind | Self::Call | Self::Bet | Self::Raise
        )
    }
    /// Counts toward a player's bet for the round. Antes do not.
    pub fn is_bet(&self) -> bool {
        self.is_wager() && *self != Self::Ante
    }
    /// Posted without a decision.
    pub fn is_forced(&self) -> bool {
        matches!(self, Self::Ante | Self::SmallBlind | Self::BigBlind)
    }
    /// A decision that hands action to the next player.
    pub fn is_voluntary(&self) -> bool {
        matches!(
            self,
            Self::Fold | Self::Check | Self::CheckRaise | Self::Call | Self::Bet | Self::Raise
        )
    }
    /// Showdown outcome for one pot.
    pub fn is_result(&self) -> bool {
        matches!(self, Self::Win | Self::Lose | Self::Overbet)
    }
    /// Opens or reopens the betting.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
    /// Ordering of voluntary actions from passive to aggressive.
    pub(crate) fn weight(&self) -> Option<u8> {
        match self {
            Self::Fold => Some(0),
            Self::Check => Some(1),
            Self::CheckRaise => Some(2),
            Self::Call => Some(3),
            Self::Bet => Some(4),
            Self::Raise => Some(5),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Ante => write!(f, "ANTE"),
            Self::SmallBlind => write!(f, "SMALL"),
            Self::BigBlind => write!(f, "BLIND"),
            Self::Fold => write!(f, "FOLD"),
            Self::Check => write!(f, "CHECK"),
            Self::CheckRaise => write!(f, "CHECKRAISE"),
            Self::Call => write!(f, "CALL"),
            Self::Bet => write!(f, "BET"),
            Self::Raise => write!(f, "RAISE"),
            Self::Win => write!(f, "WIN"),
            Self::Lose => write!(f, "LOSE"),
            Self::Overbet => write!(f, "OVERBET"),
        }
    }
}

/// Why a player folded.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum FoldKind {
    #[default]
    Normal,
    Forced,
    SittingOut,
}

/// One immutable ledger entry.
///
/// Wager entries carry the chips moved and whether they left the player
/// all-in. Raises also carry the portion that was only a call, so the
/// raise size can be recovered with [`Action::adjusted`]. Showdown results
/// carry the index of the pot they settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    seat: Position,
    round: Round,
    kind: Kind,
    amount: Chips,
    call: Chips,
    pot: Option<usize>,
    fold: Option<FoldKind>,
    all_in: bool,
    rationale: Option<String>,
}

/// Constructors.
impl Action {
    /// Ante, blind, call, or bet.
    pub fn wager(seat: Position, round: Round, kind: Kind, amount: Chips, all_in: bool) -> Self {
        assert!(kind.is_wager() && kind != Kind::Raise);
        Self::bare(seat, round, kind, amount).all_in(all_in)
    }
    /// Raise of `raise` chips on top of a `call`.
    pub fn raise(seat: Position, round: Round, call: Chips, raise: Chips, all_in: bool) -> Self {
        Self {
            call,
            ..Self::bare(seat, round, Kind::Raise, call + raise).all_in(all_in)
        }
    }
    pub fn check(seat: Position, round: Round) -> Self {
        Self::bare(seat, round, Kind::Check, 0)
    }
    pub fn check_raise(seat: Position, round: Round) -> Self {
        Self::bare(seat, round, Kind::CheckRaise, 0)
    }
    pub fn fold(seat: Position, round: Round, fold: FoldKind) -> Self {
        Self {
            fold: Some(fold),
            ..Self::bare(seat, round, Kind::Fold, 0)
        }
    }
    /// Win, lose, or overbet return for pot `pot`.
    pub fn result(seat: Position, round: Round, kind: Kind, amount: Chips, pot: usize) -> Self {
        assert!(kind.is_result());
        Self {
            pot: Some(pot),
            ..Self::bare(seat, round, kind, amount)
        }
    }
    pub fn with_rationale(mut self, rationale: Option<&str>) -> Self {
        self.rationale = rationale.map(str::to_string);
        self
    }
    fn all_in(mut self, all_in: bool) -> Self {
        self.all_in = all_in;
        self
    }
    fn bare(seat: Position, round: Round, kind: Kind, amount: Chips) -> Self {
        Self {
            seat,
            round,
            kind,
            amount,
            call: 0,
            pot: None,
            fold: None,
            all_in: false,
            rationale: None,
        }
    }
}

/// Accessors.
impl Action {
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn amount(&self) -> Chips {
        self.amount
    }
    /// Call portion of a raise; zero otherwise.
    pub fn call(&self) -> Chips {
        self.call
    }
    pub fn pot(&self) -> Option<usize> {
        self.pot
    }
    pub fn fold_kind(&self) -> Option<FoldKind> {
        self.fold
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn rationale(&self) -> Option<&str> {
        self.rationale.as_deref()
    }
    /// Size of the bet or raise with any call portion stripped.
    pub fn adjusted(&self) -> Chips {
        match self.kind {
            Kind::Raise => self.amount - self.call,
            _ => self.amount,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = format!("{:<10}", self.kind.to_string());
        let label = match self.kind {
            Kind::Fold | Kind::Lose => label.red(),
            Kind::Check | Kind::CheckRaise | Kind::Call => label.green(),
            Kind::Bet | Kind::Raise => label.yellow(),
            Kind::Win | Kind::Overbet => label.bright_green().bold(),
            Kind::Ante | Kind::SmallBlind | Kind::BigBlind => label.dimmed(),
        };
        write!(f, "{:<8} seat {} {}", self.round, self.seat, label)?;
        match self.kind {
            Kind::Raise => write!(f, " {} (call {})", self.amount, self.call)?,
            Kind::Win | Kind::Overbet | Kind::Lose => {
                write!(f, " {} pot {}", self.amount, self.pot.unwrap_or_default())?
            }
            _ if self.kind.is_wager() => write!(f, " {}", self.amount)?,
            _ => {}
        }
        if self.all_in {
            write!(f, " {}", "all-in".magenta())?;
        }
        if let Some(why) = &self.rationale {
            write!(f, " ({})", why)?;
        }
        Ok(())
    }
}
