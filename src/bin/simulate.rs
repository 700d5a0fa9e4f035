//! Simulate Binary
//!
//! Plays random hands end to end, printing each ledger and the payouts.
//!
//! Options: --hands, --players, --chips, --seed, --rules

use clap::Parser;
use holdem::Chips;
use holdem::SEATS;
use holdem::gameplay::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser)]
#[command(author, version, about = "Play random hold'em hands end to end", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 10)]
    hands: usize,
    #[arg(long, default_value_t = 6)]
    players: usize,
    #[arg(long, default_value_t = 1000)]
    chips: Chips,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Inline JSON or a path to a JSON file
    #[arg(long)]
    rules: Option<String>,
}

fn main() -> anyhow::Result<()> {
    holdem::log();
    let args = Args::parse();
    let rules = match args.rules.as_deref() {
        Some(json) if json.trim_start().starts_with('{') => Rules::from_json(json)?,
        Some(path) => Rules::from_json(&std::fs::read_to_string(path)?)?,
        None => Rules::default(),
    };
    log::info!("{} x{} with {} chips", rules, args.players, args.chips);
    let mut table = Table::default();
    for seat in 0..args.players.min(SEATS) {
        table.sit(Player::new(seat, format!("bot{}", seat), args.chips))?;
    }
    let ref mut rng = SmallRng::seed_from_u64(args.seed);
    let mut seeder = Seeder::new(args.seed);
    for n in 0..args.hands {
        if table.occupied() < 2 {
            log::info!("{} left standing", table.occupied());
            break;
        }
        let start = std::time::Instant::now();
        let mut hand = Hand::new(table, rules.clone(), seeder.next())?;
        hand.deal()?;
        play(&mut hand, rng)?;
        hand.pre_resolve(true)?;
        hand.resolve()?;
        println!("hand {} seed {}", n, hand.seed());
        for action in hand.history().iter() {
            println!("  {}", action);
        }
        for pot in hand.pots() {
            println!("  {} -> {:?}", pot, pot.winners());
        }
        seeder.adjust(start.elapsed().as_millis() as u64);
        table = hand.into_table();
        let busted = table
            .players()
            .filter(|p| p.chips() == 0)
            .map(|p| p.seat())
            .collect::<Vec<_>>();
        for seat in busted {
            log::info!("seat {} busted", seat);
            table.leave(seat);
        }
        table.rotate();
    }
    print!("{}", table);
    Ok(())
}

fn play(hand: &mut Hand, rng: &mut SmallRng) -> anyhow::Result<()> {
    while hand.round().is_betting() && !hand.is_uncontested() {
        while let Some(seat) = hand.current_player() {
            let decision = decide(hand, seat, rng);
            hand.act(seat, decision, Some("random"))?;
        }
        if hand.is_uncontested() {
            break;
        }
        hand.advance_round()?;
    }
    Ok(())
}

fn decide(hand: &Hand, seat: holdem::Position, rng: &mut SmallRng) -> Decision {
    let owed = hand.amount_to_call(seat) > 0;
    match rng.random_range(0..10) {
        0..=1 if owed => Decision::Fold,
        0..=5 => Decision::Call,
        6..=7 => Decision::Raise(hand.min_raise() * rng.random_range(1..=3)),
        _ if owed => Decision::Fold,
        _ => Decision::Check,
    }
}
