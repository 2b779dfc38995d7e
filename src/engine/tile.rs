use super::grid::Position;

pub(crate) type Value = u64;

pub(crate) type Score = u64;

/// Identifies a tile for as long as it stays on the board unmerged.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct TileId(u64);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile#{0}", self.0)
    }
}

/// Hands out tile ids that are never reused within a game session, not even across undo and
/// restart.
#[derive(Debug, Default)]
pub(crate) struct TileIds {
    next: u64,
}

impl TileIds {
    pub(crate) fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tile {
    pub(crate) id: TileId,
    pub(crate) position: Position,
    pub(crate) value: Value,
    pub(crate) previous_position: Option<Position>,
    pub(crate) is_new: bool,
    pub(crate) is_merged: bool,
    pub(crate) merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// A freshly spawned tile.
    pub(crate) fn new(id: TileId, position: Position, value: Value) -> Self {
        Self {
            id,
            position,
            value,
            previous_position: None,
            is_new: true,
            is_merged: false,
            merged_from: None,
        }
    }

    /// Combine two equal tiles into one of double value placed at `position`. The parents are
    /// consumed and only survive inside `merged_from`.
    pub(crate) fn merged(id: TileId, position: Position, moving: Tile, occupant: Tile) -> Self {
        Self {
            id,
            position,
            value: moving.value.saturating_add(occupant.value),
            previous_position: Some(moving.position),
            is_new: false,
            is_merged: true,
            merged_from: Some(Box::new([moving, occupant])),
        }
    }

    /// Reset the per-move flags; previous_position records where the tile starts this move.
    pub(crate) fn prepare(&mut self) {
        self.previous_position = Some(self.position);
        self.is_new = false;
        self.is_merged = false;
        self.merged_from = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids = TileIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn merged_consumes_parents() {
        let mut ids = TileIds::default();
        let moving = Tile::new(ids.next_id(), Position::new(0, 0), 8);
        let occupant = Tile::new(ids.next_id(), Position::new(0, 3), 8);
        let merged = Tile::merged(ids.next_id(), Position::new(0, 3), moving.clone(), occupant.clone());

        assert_eq!(merged.value, 16);
        assert!(merged.is_merged);
        assert!(!merged.is_new);
        assert_eq!(merged.previous_position, Some(Position::new(0, 0)));
        assert_eq!(merged.merged_from.as_deref(), Some(&[moving, occupant]));
    }

    #[test]
    fn prepare_resets_transient_flags() {
        let mut ids = TileIds::default();
        let a = Tile::new(ids.next_id(), Position::new(1, 1), 2);
        let b = Tile::new(ids.next_id(), Position::new(1, 2), 2);
        let mut tile = Tile::merged(ids.next_id(), Position::new(1, 2), a, b);
        tile.prepare();

        assert_eq!(tile.previous_position, Some(Position::new(1, 2)));
        assert!(!tile.is_new);
        assert!(!tile.is_merged);
        assert!(tile.merged_from.is_none());
        assert_eq!(tile.value, 4);
    }

    #[test]
    fn huge_merges_saturate() {
        let mut ids = TileIds::default();
        let half = Value::MAX / 2 + 1;
        let a = Tile::new(ids.next_id(), Position::new(0, 0), half);
        let b = Tile::new(ids.next_id(), Position::new(0, 1), half);
        let merged = Tile::merged(ids.next_id(), Position::new(0, 1), a, b);
        assert_eq!(merged.value, Value::MAX);
    }
}
