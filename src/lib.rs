//! Texas Hold'em hand resolution.
//!
//! A [`gameplay::Hand`] runs a single hand from the deal through showdown:
//! it records every wagering action in a [`gameplay::Ledger`], re-partitions
//! wagered chips into main and side [`gameplay::Pot`]s whenever money moves,
//! decides when a betting round is complete, and pays winners at showdown.
//!
//! The [`cards`] module supplies card primitives and a default hand
//! evaluator behind the [`cards::Scorer`] contract.
pub mod cards;
pub mod gameplay;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Chip amounts. Signed so that negative wagers are representable and rejected.
pub type Chips = i64;
/// Seat index around the table.
pub type Position = usize;
/// Pot odds and similar ratios.
pub type Probability = f32;

// ============================================================================
// CONSTANTS
// ============================================================================
/// Seats available at a table.
pub const SEATS: usize = 10;
/// Private cards dealt to each player.
pub const CARDS_PER_HOLE: usize = 2;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for tests, benches, and simulation.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Initialize terminal and file logging.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
