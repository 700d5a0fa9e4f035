use super::player::Player;
use super::violation::Violation;
use crate::Chips;
use crate::Position;
use crate::SEATS;
use serde::Serialize;

/// Seating geometry the hand reads: occupied seats, the button, and the
/// smallest chip denomination in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    seats: Vec<Option<Player>>,
    button: Position,
    min_chip: Chips,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            seats: vec![None; SEATS],
            button: 0,
            min_chip: 1,
        }
    }
}

impl Table {
    /// Empty table whose wagers must be multiples of `min_chip`.
    pub fn new(min_chip: Chips) -> anyhow::Result<Self> {
        let mut table = Self::default();
        table.set_min_chip(min_chip)?;
        Ok(table)
    }
    pub fn sit(&mut self, player: Player) -> anyhow::Result<()> {
        let seat = player.seat();
        match self.seats.get_mut(seat) {
            None => Err(Violation::UnknownSeat(seat).into()),
            Some(Some(_)) => Err(Violation::SeatTaken(seat).into()),
            Some(slot) => {
                *slot = Some(player);
                Ok(())
            }
        }
    }
    pub fn leave(&mut self, seat: Position) -> Option<Player> {
        self.seats.get_mut(seat).and_then(Option::take)
    }
    pub fn set_button(&mut self, seat: Position) -> anyhow::Result<()> {
        if self.player(seat).is_none() {
            return Err(Violation::UnknownSeat(seat).into());
        }
        self.button = seat;
        Ok(())
    }
    /// Moves the button to the next occupied seat.
    pub fn rotate(&mut self) {
        if let Some(next) = self.next_seat(self.button) {
            self.button = next;
        }
    }
    pub fn set_min_chip(&mut self, min_chip: Chips) -> anyhow::Result<()> {
        if min_chip <= 0 {
            return Err(Violation::ChipUnit(min_chip).into());
        }
        self.min_chip = min_chip;
        Ok(())
    }
}

/// Geometry queries.
impl Table {
    pub fn button(&self) -> Position {
        self.button
    }
    pub fn min_chip(&self) -> Chips {
        self.min_chip
    }
    pub fn occupied(&self) -> usize {
        self.seats.iter().flatten().count()
    }
    pub fn player(&self, seat: Position) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }
    pub fn player_mut(&mut self, seat: Position) -> Option<&mut Player> {
        self.seats.get_mut(seat).and_then(Option::as_mut)
    }
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().flatten()
    }
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.iter_mut().flatten()
    }
    /// Next occupied seat clockwise from `seat`, wrapping. `seat` itself
    /// is returned only when it is the sole occupied seat.
    pub fn next_seat(&self, seat: Position) -> Option<Position> {
        (1..=SEATS)
            .map(|i| (seat + i) % SEATS)
            .find(|s| self.player(*s).is_some())
    }
    pub fn next_seat_after_button(&self) -> Option<Position> {
        self.next_seat(self.button)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for player in self.players() {
            let marker = if player.seat() == self.button { "D" } else { " " };
            writeln!(f, "{} {}", marker, player)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(seats: &[Position]) -> Table {
        let mut table = Table::default();
        for &seat in seats {
            table.sit(Player::new(seat, format!("p{}", seat), 1000)).unwrap();
        }
        table
    }

    #[test]
    fn next_seat_skips_empty_and_wraps() {
        let table = table(&[1, 4, 8]);
        assert!(table.next_seat(1) == Some(4));
        assert!(table.next_seat(5) == Some(8));
        assert!(table.next_seat(8) == Some(1));
        assert!(Table::default().next_seat(0).is_none());
    }

    #[test]
    fn seating_is_validated() {
        let mut table = table(&[3]);
        assert!(table.sit(Player::new(3, "again", 10)).is_err());
        assert!(table.sit(Player::new(SEATS, "nowhere", 10)).is_err());
        assert!(table.set_button(5).is_err());
        assert!(table.set_button(3).is_ok());
        assert!(table.occupied() == 1);
    }

    #[test]
    fn chip_unit_must_be_positive() {
        assert!(Table::new(0).is_err());
        assert!(Table::new(-5).is_err());
        assert!(Table::new(25).unwrap().min_chip() == 25);
        let mut table = Table::default();
        let err = table.set_min_chip(0).unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::ChipUnit(0)));
        assert!(table.min_chip() == 1);
    }
}
