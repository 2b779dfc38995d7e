use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::game::{GameConfig, DEFAULT_SIZE};
use crate::engine::outcome::DEFAULT_TARGET;
use crate::engine::tile::Value;
use crate::stats::{JsonFileStore, MemoryStore, Stats};

/// Slide numbered tiles around a square board and merge them to reach the target tile.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Args {
    /// Width and height of the board
    #[arg(long, default_value_t = DEFAULT_SIZE as u8, value_parser = clap::value_parser!(u8).range(2..=8))]
    size: u8,

    /// Tile value that wins the game
    #[arg(long, default_value_t = DEFAULT_TARGET, value_parser = clap::value_parser!(u64).range(4..))]
    target: Value,

    /// Seed for tile placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best score and games played are kept
    #[arg(long, value_name = "FILE", default_value = "slide48-stats.json")]
    stats_file: PathBuf,

    /// Keep statistics in memory only
    #[arg(long)]
    no_stats: bool,

    /// Log destination; the terminal is taken over by the game
    #[arg(long, value_name = "FILE", default_value = "slide48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Args {
    pub(crate) fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size as usize,
            target: self.target,
        }
    }

    pub(crate) fn stats(&self) -> Stats {
        if self.no_stats {
            Stats::new(MemoryStore::default())
        } else {
            Stats::new(JsonFileStore::new(self.stats_file.clone()))
        }
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub(crate) fn log_file(&self) -> &PathBuf {
        &self.log_file
    }

    pub(crate) fn log_level(&self) -> log::LevelFilter {
        self.verbose.log_level_filter()
    }
}

#[cfg(test)]
mod test {
    use rand::RngCore;
    use rstest::*;

    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["slide48"]).expect("no arguments are required");
        assert_eq!(args.game_config(), GameConfig::default());
        assert_eq!(args.stats_file, PathBuf::from("slide48-stats.json"));
        assert_eq!(args.log_file(), &PathBuf::from("slide48.log"));
        assert_eq!(args.log_level(), log::LevelFilter::Info);
        assert!(!args.no_stats);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn custom_board() {
        let args = Args::try_parse_from(["slide48", "--size", "6", "--target", "512", "-vv"])
            .expect("valid arguments");
        assert_eq!(
            args.game_config(),
            GameConfig {
                size: 6,
                target: 512
            }
        );
        assert_eq!(args.log_level(), log::LevelFilter::Trace);
    }

    #[rstest]
    #[case::too_small(&["slide48", "--size", "1"])]
    #[case::too_large(&["slide48", "--size", "9"])]
    #[case::tiny_target(&["slide48", "--target", "2"])]
    #[case::not_a_number(&["slide48", "--seed", "abc"])]
    fn rejected(#[case] argv: &[&str]) {
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn seeded_games_repeat() {
        let args = Args::try_parse_from(["slide48", "--seed", "7"]).expect("valid arguments");
        assert_eq!(args.rng().next_u64(), args.rng().next_u64());
    }

    #[test]
    fn in_memory_stats() {
        let args = Args::try_parse_from(["slide48", "--no-stats"]).expect("valid arguments");
        let mut stats = args.stats();
        stats.record_best_score(128);
        assert_eq!(stats.best_score(), 128);
    }
}
