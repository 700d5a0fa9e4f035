use super::rank::Rank;

/// Kicker ranks as a bitmask.
///
/// For equal counts of set bits, comparing the masks as integers compares
/// the kickers from the highest down.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kickers(u16);

impl Kickers {
    /// Keeps only the `n` highest ranks of a mask.
    pub fn top(mask: u16, n: usize) -> Self {
        let mut mask = mask & Rank::mask();
        while mask.count_ones() as usize > n {
            mask &= mask - 1;
        }
        Self(mask)
    }
}

impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n & Rank::mask())
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.into_iter().map(u16::from).fold(0, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Rank::all().into_iter().rev() {
            if self.0 & u16::from(rank) != 0 {
                write!(f, "{}", rank)?;
            }
        }
        Ok(())
    }
}
