use super::grid::Grid;
use super::shift::Direction;
use super::tile::Value;

pub(crate) const DEFAULT_TARGET: Value = 2048;

/// True when some tile has reached `target`. Whether this is news is for the caller to decide.
pub(crate) fn has_won(grid: &Grid, target: Value) -> bool {
    grid.tiles().any(|tile| tile.value == target)
}

/// True when the board is full and no two neighbouring tiles share a value.
pub(crate) fn is_game_over(grid: &Grid) -> bool {
    if !grid.available_cells().is_empty() {
        return false;
    }
    !grid.tiles().any(|tile| {
        Direction::ALL.iter().any(|direction| {
            let neighbour = direction.vector().step(&tile.position);
            grid.cell_content(&neighbour)
                .map_or(false, |other| other.value == tile.value)
        })
    })
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::super::grid::test::grid_from;
    use super::super::tile::TileIds;
    use super::*;

    #[rstest]
    #[case::empty([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], false)]
    #[case::below_target([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], false)]
    #[case::at_target([[0, 0, 0, 0], [0, 0, 2048, 0], [0, 0, 0, 0], [0, 0, 0, 0]], true)]
    #[case::past_target_only([[4096, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], false)]
    fn won(#[case] values: [[Value; 4]; 4], #[case] expected: bool) {
        let mut ids = TileIds::default();
        assert_eq!(has_won(&grid_from(values, &mut ids), DEFAULT_TARGET), expected);
    }

    #[test]
    fn custom_target() {
        let mut ids = TileIds::default();
        let grid = grid_from([[64, 0], [0, 0]], &mut ids);
        assert!(has_won(&grid, 64));
        assert!(!has_won(&grid, 128));
    }

    #[rstest]
    #[case::checkerboard(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        true,
    )]
    #[case::distinct_values(
        [[2, 4, 8, 16], [32, 64, 128, 256], [512, 1024, 2, 4], [8, 16, 32, 64]],
        true,
    )]
    #[case::horizontal_pair(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 4, 8], [4, 2, 16, 2]],
        false,
    )]
    #[case::vertical_pair(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [4, 2, 16, 8]],
        false,
    )]
    #[case::one_empty_cell(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]],
        false,
    )]
    fn game_over(#[case] values: [[Value; 4]; 4], #[case] expected: bool) {
        let mut ids = TileIds::default();
        assert_eq!(is_game_over(&grid_from(values, &mut ids)), expected);
    }
}
