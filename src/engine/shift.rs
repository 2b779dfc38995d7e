use crate::error::Error;

use super::grid::{Grid, Position};
use super::tile::{Score, Tile, TileIds};

/// Direction of a move. The discriminants are the direction codes shared with input capture and
/// must not change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub(crate) fn code(self) -> u8 {
        self as u8
    }

    pub(crate) fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 0, y: 1 },
            Direction::Down => Vector { x: 1, y: 0 },
            Direction::Left => Vector { x: 0, y: -1 },
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or(Error::InvalidDirection(code))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// Unit step on the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Vector {
    pub(crate) x: isize,
    pub(crate) y: isize,
}

impl Vector {
    pub(crate) fn step(&self, pos: &Position) -> Position {
        Position::new(pos.x + self.x, pos.y + self.y)
    }
}

/// Order in which cells are visited during a move: tiles furthest along the vector come first so
/// a single pass slides and merges correctly.
#[derive(Debug, PartialEq)]
pub(crate) struct Traversals {
    pub(crate) x: Vec<isize>,
    pub(crate) y: Vec<isize>,
}

impl Traversals {
    pub(crate) fn new(vector: Vector, size: usize) -> Self {
        let mut x: Vec<isize> = (0..size as isize).collect();
        let mut y = x.clone();
        if vector.x > 0 {
            x.reverse();
        }
        if vector.y > 0 {
            y.reverse();
        }
        Self { x, y }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct FarthestPosition {
    /// Last empty cell reachable from the start.
    pub(crate) farthest: Position,
    /// First cell past `farthest`; occupied or out of bounds.
    pub(crate) next: Position,
}

pub(crate) fn find_farthest_position(grid: &Grid, pos: &Position, vector: Vector) -> FarthestPosition {
    let mut previous = *pos;
    let mut current = vector.step(pos);
    while grid.within_bounds(&current) && grid.cell_available(&current) {
        previous = current;
        current = vector.step(&current);
    }
    FarthestPosition {
        farthest: previous,
        next: current,
    }
}

/// Reset every tile's per-move state. Must run once before each move.
pub(crate) fn prepare_tiles(grid: &mut Grid) {
    for tile in grid.tiles_mut() {
        tile.prepare();
    }
}

#[derive(Debug)]
pub(crate) struct MoveResult {
    pub(crate) grid: Grid,
    pub(crate) moved: bool,
    pub(crate) score_gain: Score,
}

/// Slide and merge every tile of `grid` in `direction`. Merged tiles draw fresh ids from `ids`.
pub(crate) fn move_tiles(mut grid: Grid, direction: Direction, ids: &mut TileIds) -> MoveResult {
    let vector = direction.vector();
    let traversals = Traversals::new(vector, grid.size());
    let mut moved = false;
    let mut score_gain: Score = 0;

    for &x in &traversals.x {
        for &y in &traversals.y {
            let pos = Position::new(x, y);
            let Some((value, already_merged)) =
                grid.cell_content(&pos).map(|t| (t.value, t.is_merged))
            else {
                continue;
            };
            let FarthestPosition { farthest, next } = find_farthest_position(&grid, &pos, vector);

            let mergeable = grid
                .cell_content(&next)
                .map_or(false, |n| n.value == value && !n.is_merged && !already_merged);

            if mergeable {
                if let (Some(moving), Some(occupant)) = (grid.remove_tile(&pos), grid.remove_tile(&next)) {
                    let merged = Tile::merged(ids.next_id(), next, moving, occupant);
                    score_gain = score_gain.saturating_add(merged.value);
                    grid.insert_tile(merged);
                    moved = true;
                }
            } else if farthest != pos {
                if let Some(mut tile) = grid.remove_tile(&pos) {
                    tile.position = farthest;
                    grid.insert_tile(tile);
                    moved = true;
                }
            }
        }
    }

    MoveResult {
        grid,
        moved,
        score_gain,
    }
}
