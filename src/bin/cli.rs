use clap::Parser;
use headsup_engine::holdem::cli::{run, CliArgs};

fn main() {
    headsup_engine::init_logging();
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
