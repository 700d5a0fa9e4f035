use super::violation::Violation;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Betting structure.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    #[default]
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoLimit => write!(f, "no-limit"),
            Self::PotLimit => write!(f, "pot-limit"),
            Self::FixedLimit => write!(f, "fixed-limit"),
        }
    }
}

/// Stakes and limits in force for one hand.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "game": "pot_limit", "small_blind": 5, "big_blind": 10, "ante": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    game: Game,
    ante: Chips,
    small_blind: Chips,
    big_blind: Chips,
    max_raises: usize,
    raise_cap_ignored_heads_up: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            game: Game::NoLimit,
            ante: 0,
            small_blind: 10,
            big_blind: 20,
            max_raises: 3,
            raise_cap_ignored_heads_up: true,
        }
    }
}

/// Constructors.
impl Rules {
    pub fn no_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self::new(Game::NoLimit, small_blind, big_blind)
    }
    pub fn pot_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self::new(Game::PotLimit, small_blind, big_blind)
    }
    pub fn fixed_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self::new(Game::FixedLimit, small_blind, big_blind)
    }
    pub fn with_ante(mut self, ante: Chips) -> Self {
        self.ante = ante;
        self
    }
    pub fn with_max_raises(mut self, max_raises: usize, ignored_heads_up: bool) -> Self {
        self.max_raises = max_raises;
        self.raise_cap_ignored_heads_up = ignored_heads_up;
        self
    }
    fn new(game: Game, small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            game,
            small_blind,
            big_blind,
            ..Self::default()
        }
    }
}

/// Accessors.
impl Rules {
    pub fn game(&self) -> Game {
        self.game
    }
    pub fn ante(&self) -> Chips {
        self.ante
    }
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }
    /// Raise cap for a round given how many players still hold cards.
    pub fn max_raises(&self, with_cards: usize) -> usize {
        if with_cards <= 2 && self.raise_cap_ignored_heads_up {
            usize::MAX
        } else {
            self.max_raises
        }
    }
}

/// Validation and loading.
impl Rules {
    pub fn validate(&self) -> anyhow::Result<()> {
        let invalid = |why: &str| -> anyhow::Result<()> {
            Err(Violation::InvalidRules(why.to_string()).into())
        };
        if self.ante < 0 || self.small_blind < 0 || self.big_blind < 0 {
            return invalid("negative stakes");
        }
        if self.big_blind == 0 {
            return invalid("big blind must be positive");
        }
        if self.small_blind > self.big_blind {
            return invalid("small blind exceeds big blind");
        }
        if self.game == Game::FixedLimit && self.max_raises == 0 {
            return invalid("fixed-limit needs at least one raise");
        }
        Ok(())
    }
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let rules = serde_json::from_str::<Self>(json)?;
        rules.validate()?;
        Ok(rules)
    }
}

impl std::fmt::Display for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}/{}", self.game, self.small_blind, self.big_blind)?;
        if self.ante > 0 {
            write!(f, " ante {}", self.ante)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_defaults() {
        let rules = Rules::from_json(r#"{ "game": "pot_limit", "big_blind": 50, "small_blind": 25 }"#).unwrap();
        assert!(rules.game() == Game::PotLimit);
        assert!(rules.big_blind() == 50);
        assert!(rules.ante() == 0);
        assert!(rules.max_raises(3) == 3);
        assert!(rules.max_raises(2) == usize::MAX);
    }

    #[test]
    fn rejects_inverted_blinds() {
        let err = Rules::from_json(r#"{ "small_blind": 30, "big_blind": 20 }"#).unwrap_err();
        assert!(matches!(err.downcast_ref::<Violation>(), Some(Violation::InvalidRules(_))));
        assert!(Rules::no_limit(0, 0).validate().is_err());
    }
}
