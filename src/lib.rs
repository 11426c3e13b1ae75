pub mod holdem;

/// dimensional analysis type
pub type Chips = i32;

// heads-up table defaults, shared by the hand engine, the tree builder's default
// BettingAbstraction, and the CLI/server adapters' own argument defaults.
pub const STACK: Chips = 1000;
pub const S_BLIND: Chips = 5;
pub const B_BLIND: Chips = 10;

/// initialize dual terminal + file logging. simplelog only allows one global
/// logger per process, so callers invoke this once at binary startup.
#[cfg(any(feature = "cli", feature = "server"))]
pub fn init_logging() {
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
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let _ = simplelog::CombinedLogger::init(vec![term, file]);
}
