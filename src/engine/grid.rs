use super::tile::{Tile, Value};

/// Position on the grid. `x` is the row (the up/down axis) and `y` the column (the left/right
/// axis). Coordinates are signed so that probing may step off the board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: isize,
    pub(crate) y: isize,
}

impl Position {
    pub(crate) fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pos({0},{1})", self.x, self.y)
    }
}

/// Grid is a square board of optional tiles. Cloning it yields a fully independent copy, which is
/// what undo snapshots rely on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: usize,
    cells: Vec<Vec<Option<Tile>>>,
}

impl Grid {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn within_bounds(&self, pos: &Position) -> bool {
        let size = self.size as isize;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    pub(crate) fn cell_content(&self, pos: &Position) -> Option<&Tile> {
        if !self.within_bounds(pos) {
            return None;
        }
        self.cells[pos.x as usize][pos.y as usize].as_ref()
    }

    pub(crate) fn cell_occupied(&self, pos: &Position) -> bool {
        self.cell_content(pos).is_some()
    }

    pub(crate) fn cell_available(&self, pos: &Position) -> bool {
        !self.cell_occupied(pos)
    }

    /// All empty positions, x outer and y inner.
    pub(crate) fn available_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|pos| self.cell_available(pos))
            .collect()
    }

    /// Every tile on the board in scan order.
    pub(crate) fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten().flatten()
    }

    /// Place a tile in the cell named by its own position, returning whatever occupied it before.
    pub(crate) fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        let pos = tile.position;
        match self.slot_mut(&pos) {
            Some(slot) => slot.replace(tile),
            None => {
                log::warn!("dropping {0} placed out of bounds at {1}", tile.id, pos);
                None
            }
        }
    }

    pub(crate) fn remove_tile(&mut self, pos: &Position) -> Option<Tile> {
        self.slot_mut(pos).and_then(Option::take)
    }

    /// Tile values row by row, 0 for an empty cell.
    pub(crate) fn values(&self) -> Vec<Vec<Value>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.as_ref().map_or(0, |t| t.value)).collect())
            .collect()
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size as isize;
        (0..size).flat_map(move |x| (0..size).map(move |y| Position::new(x, y)))
    }

    fn slot_mut(&mut self, pos: &Position) -> Option<&mut Option<Tile>> {
        if !self.within_bounds(pos) {
            return None;
        }
        Some(&mut self.cells[pos.x as usize][pos.y as usize])
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values() {
            let row = row
                .iter()
                .map(|v| format!("{v:>5}"))
                .collect::<Vec<_>>()
                .join("");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
