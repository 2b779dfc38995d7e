use rand::RngCore;

use super::grid::Grid;
use super::outcome::{has_won, is_game_over, DEFAULT_TARGET};
use super::shift::{move_tiles, prepare_tiles, Direction, MoveResult};
use super::spawn::Spawner;
use super::tile::{Score, TileIds, Value};
use crate::stats::Stats;

pub(crate) const DEFAULT_SIZE: usize = 4;
const INITIAL_TILES: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) size: usize,
    pub(crate) target: Value,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            target: DEFAULT_TARGET,
        }
    }
}

/// The board and score as they stood before the last successful move.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    pub(crate) score: Score,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Playing,
    Won { keep_playing: bool },
    Over,
}

/// Everything a host needs to draw the game.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameState {
    pub(crate) grid: Grid,
    pub(crate) size: usize,
    pub(crate) over: bool,
    pub(crate) won: bool,
    pub(crate) keep_playing: bool,
    pub(crate) previous: Option<Snapshot>,
    pub(crate) score: Score,
    pub(crate) best_score: Score,
}

impl GameState {
    pub(crate) fn status(&self) -> Status {
        if self.over {
            Status::Over
        } else if self.won {
            Status::Won {
                keep_playing: self.keep_playing,
            }
        } else {
            Status::Playing
        }
    }

    pub(crate) fn accepts_moves(&self) -> bool {
        !matches!(
            self.status(),
            Status::Over
                | Status::Won {
                    keep_playing: false
                }
        )
    }
}

/// What a call to [`Game::shift`] did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Turn {
    /// Unknown direction code, or the game is not taking moves right now.
    Rejected,
    /// Nothing could slide or merge; the game is exactly as it was.
    Unchanged,
    Moved {
        score_gain: Score,
        just_won: bool,
        over: bool,
    },
}

/// Game runs turns of 2048 on a square grid and keeps one snapshot for undo.
pub(crate) struct Game {
    config: GameConfig,
    rng: Box<dyn RngCore>,
    ids: TileIds,
    spawner: Spawner,
    stats: Stats,
    state: GameState,
}

impl Game {
    /// Start a game using the given random number generator. The best score is read from `stats`.
    pub(crate) fn new(config: GameConfig, rng: impl RngCore + 'static, stats: Stats) -> Self {
        let best_score = stats.best_score();
        let mut game = Self {
            state: GameState {
                grid: Grid::new(config.size),
                size: config.size,
                over: false,
                won: false,
                keep_playing: false,
                previous: None,
                score: 0,
                best_score,
            },
            config,
            rng: Box::new(rng),
            ids: TileIds::default(),
            spawner: Spawner::default(),
            stats,
        };
        game.start();
        game
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn stats(&self) -> &Stats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Play one turn in the direction named by `code` (0 up, 1 right, 2 down, 3 left). The turn
    /// either applies completely or leaves the game untouched.
    pub(crate) fn shift(&mut self, code: u8) -> Turn {
        if !self.state.accepts_moves() {
            log::debug!("ignoring move while {0:?}", self.state.status());
            return Turn::Rejected;
        }
        let direction = match Direction::try_from(code) {
            Ok(direction) => direction,
            Err(e) => {
                log::debug!("ignoring move: {e}");
                return Turn::Rejected;
            }
        };

        let snapshot = Snapshot {
            grid: self.state.grid.clone(),
            score: self.state.score,
        };
        let mut working = self.state.grid.clone();
        prepare_tiles(&mut working);
        let MoveResult {
            mut grid,
            moved,
            score_gain,
        } = move_tiles(working, direction, &mut self.ids);
        if !moved {
            log::debug!("shifting {direction} changed nothing");
            return Turn::Unchanged;
        }

        self.spawner
            .add_random_tile(&mut grid, self.rng.as_mut(), &mut self.ids);

        let score = self.state.score.saturating_add(score_gain);
        if score > self.state.best_score {
            self.state.best_score = score;
            self.stats.record_best_score(score);
        }

        let just_won = !self.state.won && has_won(&grid, self.config.target);
        let over = !just_won && is_game_over(&grid);

        log::info!("shifted {direction}: +{score_gain} (score {score})");
        log::trace!("board after shifting {direction}:\n{grid}");
        trace_tile_changes(&grid);

        self.state.grid = grid;
        self.state.score = score;
        self.state.won |= just_won;
        self.state.over = over;
        self.state.previous = Some(snapshot);

        if just_won {
            log::info!("reached {0}", self.config.target);
        }
        if over {
            log::info!("game over with score {score}");
            self.stats.increment_games_played();
        }

        Turn::Moved {
            score_gain,
            just_won,
            over,
        }
    }

    /// Abandon the current game and start over. Counts as a game played.
    pub(crate) fn restart(&mut self) {
        log::info!("restarting with score {0}", self.state.score);
        self.stats.increment_games_played();
        self.start();
    }

    /// Roll back the last successful move. Only one move can be undone.
    pub(crate) fn undo(&mut self) -> bool {
        let Some(snapshot) = self.state.previous.take() else {
            log::debug!("nothing to undo");
            return false;
        };
        log::info!("undoing back to score {0}", snapshot.score);
        self.state.grid = snapshot.grid;
        self.state.score = snapshot.score;
        self.state.over = false;
        self.state.won = false;
        true
    }

    /// Continue after reaching the target tile.
    pub(crate) fn keep_playing(&mut self) -> bool {
        if self.state.status() != (Status::Won { keep_playing: false }) {
            log::debug!("keep playing ignored while {0:?}", self.state.status());
            return false;
        }
        self.state.keep_playing = true;
        self.state.over = false;
        true
    }

    fn start(&mut self) {
        let mut grid = Grid::new(self.config.size);
        for _ in 0..INITIAL_TILES {
            self.spawner
                .add_random_tile(&mut grid, self.rng.as_mut(), &mut self.ids);
        }
        log::trace!("new board:\n{grid}");
        self.state = GameState {
            grid,
            size: self.config.size,
            over: false,
            won: false,
            keep_playing: false,
            previous: None,
            score: 0,
            best_score: self.state.best_score,
        };
    }

    #[cfg(test)]
    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.state.grid = grid;
    }

    #[cfg(test)]
    pub(crate) fn ids_mut(&mut self) -> &mut TileIds {
        &mut self.ids
    }
}

fn trace_tile_changes(grid: &Grid) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    for tile in grid.tiles() {
        match (&tile.merged_from, tile.previous_position) {
            (Some(parents), _) => log::trace!(
                "{0} and {1} merged into {2} at {3}",
                parents[0].id,
                parents[1].id,
                tile.id,
                tile.position
            ),
            (None, Some(from)) if from != tile.position => {
                log::trace!("{0} slid from {from} to {1}", tile.id, tile.position)
            }
            _ => {}
        }
    }
}
