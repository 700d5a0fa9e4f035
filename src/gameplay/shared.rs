use super::hand::Hand;
use super::ledger::Ledger;
use super::pot::Pot;
use super::round::Round;
use crate::Position;
use crate::cards::Card;
use serde::Serialize;
use std::sync::Arc;
use std::sync::Mutex;

/// Consistent copy of what a display needs, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub round: Round,
    pub community: Vec<Card>,
    pub pots: Vec<Pot>,
    pub ledger: Ledger,
    pub current: Option<Position>,
}

impl From<&Hand> for Snapshot {
    fn from(hand: &Hand) -> Self {
        Self {
            round: hand.round_for_display(),
            community: hand.community_for_display().to_vec(),
            pots: hand.pots(),
            ledger: hand.history(),
            current: hand.current_player(),
        }
    }
}

/// A hand one driver thread mutates while others read snapshots.
#[derive(Debug, Clone)]
pub struct Shared(Arc<Mutex<Hand>>);

impl From<Hand> for Shared {
    fn from(hand: Hand) -> Self {
        Self(Arc::new(Mutex::new(hand)))
    }
}

impl Shared {
    /// Runs one mutation with exclusive access.
    pub fn write<T>(&self, f: impl FnOnce(&mut Hand) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut hand = self
            .0
            .lock()
            .map_err(|_| anyhow::anyhow!("hand lock poisoned"))?;
        f(&mut hand)
    }
    pub fn snapshot(&self) -> anyhow::Result<Snapshot> {
        let hand = self
            .0
            .lock()
            .map_err(|_| anyhow::anyhow!("hand lock poisoned"))?;
        Ok(Snapshot::from(&*hand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Player;
    use crate::gameplay::Rules;
    use crate::gameplay::Table;

    fn shared() -> Shared {
        let mut table = Table::default();
        table.sit(Player::new(2, "a", 300)).unwrap();
        table.sit(Player::new(6, "b", 300)).unwrap();
        table.set_button(2).unwrap();
        Shared::from(Hand::new(table, Rules::default(), 4).unwrap())
    }

    #[test]
    fn snapshots_are_detached() {
        let shared = shared();
        shared.write(|hand| hand.deal()).unwrap();
        let before = shared.snapshot().unwrap();
        shared.write(|hand| hand.call(2, 10, None)).unwrap();
        let after = shared.snapshot().unwrap();
        assert!(before.ledger.len() == 2);
        assert!(after.ledger.len() == 3);
        assert!(before.current == Some(2));
        assert!(after.current == Some(6));
    }

    #[test]
    fn readers_on_other_threads() {
        let shared = shared();
        shared.write(|hand| hand.deal()).unwrap();
        let reader = shared.clone();
        let handle = std::thread::spawn(move || reader.snapshot().map(|s| s.pots.len()));
        assert!(handle.join().unwrap().unwrap() == 1);
    }

    #[test]
    fn poisoned_lock_is_an_error() {
        let shared = shared();
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let _: anyhow::Result<()> = poisoner.write(|_| panic!("driver crashed"));
        })
        .join();
        assert!(shared.snapshot().is_err());
        assert!(shared.write(|hand| hand.deal()).is_err());
    }
}
