const MODULUS: u64 = i32::MAX as u64;

/// Deck seeds for a run of hands.
///
/// Each seed derives from the previous one and a multiplier that grows with
/// the time drivers report between actions. Both are explicit state, so a
/// run replays exactly given the same starting seed and timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeder {
    last: u64,
    adj: u64,
}

impl Seeder {
    pub fn new(initial: u64) -> Self {
        Self { last: initial, adj: 2 }
    }
    pub fn last(&self) -> u64 {
        self.last
    }
    /// Seed for the next hand.
    pub fn next(&mut self) -> u64 {
        let mut seed = (self.last.wrapping_mul(self.adj)) % MODULUS;
        if seed == 0 || seed == self.last {
            seed = self.last / self.adj;
        }
        if seed == 0 || seed == self.last {
            seed = self.adj;
        }
        if seed == self.last {
            seed = (self.last + self.adj) % MODULUS;
        }
        self.last = seed;
        seed
    }
    /// Folds elapsed wall time into the multiplier.
    pub fn adjust(&mut self, elapsed_ms: u64) {
        self.adj = self.adj.saturating_add(elapsed_ms);
        if self.adj >= MODULUS {
            self.adj = 2;
        }
        self.adj %= MODULUS;
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new(1)
    }
}
