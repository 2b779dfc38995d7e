use std::io::stdout;

use anyhow::Result;
use clap::Parser;

mod config;
mod engine;
mod error;
mod slide48;
mod stats;
mod tui;

use config::Args;
use engine::game::Game;
use slide48::Slide48;
use tui::crossterm::{Crossterm, CrosstermEvents};

fn setup_logging(args: &Args) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(args.log_level())
        .chain(fern::log_file(args.log_file())?)
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args)?;

    let config = args.game_config();
    log::info!(
        "starting a {0}x{0} game with target {1}",
        config.size,
        config.target
    );
    let game = Game::new(config, args.rng(), args.stats());

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    Slide48::new(game, renderer, CrosstermEvents).run()?;
    Ok(())
}
