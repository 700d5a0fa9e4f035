use super::round::Round;
use super::table::Table;
use super::violation::Violation;
use crate::Position;

/// Seats in acting order for `round`.
///
/// Pre-flop action opens three seats after the button, or on the button
/// heads-up. Later betting rounds open on the seat after the button. At
/// showdown the order is reveal order, opening on `reveal` when given.
/// Unless `require_cards` is false, seats without hole cards are skipped.
/// A seat's 1-based position is its index in the result plus one.
pub fn order(
    table: &Table,
    round: Round,
    reveal: Option<Position>,
    require_cards: bool,
) -> anyhow::Result<Vec<Position>> {
    let seated = table.occupied();
    let after = table.next_seat_after_button().ok_or(Violation::EmptyTable)?;
    let start = match round {
        Round::PreFlop if seated == 2 => table.button(),
        Round::PreFlop => {
            let small = after;
            let big = table.next_seat(small).ok_or(Violation::EmptyTable)?;
            table.next_seat(big).ok_or(Violation::EmptyTable)?
        }
        Round::Showdown => reveal.unwrap_or(after),
        _ => after,
    };
    let start = match table.player(start) {
        Some(_) => start,
        None => table.next_seat(start).ok_or(Violation::EmptyTable)?,
    };
    let mut seats = Vec::with_capacity(seated);
    let mut seat = start;
    for _ in 0..seated {
        if let Some(player) = table.player(seat) {
            if player.cards().is_some() || !require_cards {
                seats.push(seat);
            }
        }
        seat = table.next_seat(seat).ok_or(Violation::EmptyTable)?;
    }
    log::trace!("{} order {:?}", round, seats);
    Ok(seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hole;
    use crate::gameplay::Player;

    fn table(seats: &[Position], button: Position) -> Table {
        let mut table = Table::default();
        for &seat in seats {
            table.sit(Player::new(seat, format!("p{}", seat), 1000)).unwrap();
        }
        table.set_button(button).unwrap();
        table
    }

    #[test]
    fn preflop_opens_after_big_blind() {
        let table = table(&[0, 2, 3, 5, 7, 9], 3);
        let seats = order(&table, Round::PreFlop, None, false).unwrap();
        assert!(seats == vec![9, 0, 2, 3, 5, 7]);
    }

    #[test]
    fn heads_up_preflop_opens_on_button() {
        let table = table(&[4, 6], 6);
        assert!(order(&table, Round::PreFlop, None, false).unwrap() == vec![6, 4]);
        assert!(order(&table, Round::Flop, None, false).unwrap() == vec![4, 6]);
    }

    #[test]
    fn three_handed_button_opens_preflop() {
        let table = table(&[1, 2, 3], 1);
        assert!(order(&table, Round::PreFlop, None, false).unwrap() == vec![1, 2, 3]);
        assert!(order(&table, Round::Turn, None, false).unwrap() == vec![2, 3, 1]);
    }

    #[test]
    fn showdown_opens_on_reveal_seat() {
        let table = table(&[1, 2, 3, 4], 1);
        assert!(order(&table, Round::Showdown, Some(3), false).unwrap() == vec![3, 4, 1, 2]);
        assert!(order(&table, Round::Showdown, None, false).unwrap() == vec![2, 3, 4, 1]);
    }

    #[test]
    fn skips_seats_without_cards() {
        let mut table = table(&[1, 2, 3], 1);
        let hole = Hole::try_from("As Kd").unwrap();
        table.player_mut(1).unwrap().deal(hole);
        table.player_mut(3).unwrap().deal(hole);
        assert!(order(&table, Round::Flop, None, true).unwrap() == vec![3, 1]);
        assert!(order(&table, Round::Flop, None, false).unwrap() == vec![2, 3, 1]);
    }

    #[test]
    fn empty_table_fails() {
        let err = order(&Table::default(), Round::Flop, None, false).unwrap_err();
        assert!(err.downcast_ref::<Violation>() == Some(&Violation::EmptyTable));
    }
}
