//! Conway transition rule (B3/S23)

use super::grid::Grid;

/// Computes the next generation from the current one.
///
/// The controller and history only ever go through this trait, which lets
/// tests count how often a generation is actually computed.
pub trait Transition {
    fn next(&self, grid: &Grid) -> Grid;
}

/// Standard Conway rule
#[derive(Clone, Copy, Debug, Default)]
pub struct Conway;

impl Transition for Conway {
    fn next(&self, grid: &Grid) -> Grid {
        step(grid)
    }
}

impl<F> Transition for F
where
    F: Fn(&Grid) -> Grid,
{
    fn next(&self, grid: &Grid) -> Grid {
        self(grid)
    }
}

/// Whether a cell is alive next generation
#[inline]
pub fn survives(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// One synchronous generation: every cell reads the same input snapshot.
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            next.set(row, col, survives(alive, grid.count_live_neighbors(row, col)));
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.iter().map(|&c| c == 1).collect()).collect()).unwrap()
    }

    #[test]
    fn rule_table() {
        for n in 0..=8u8 {
            assert_eq!(survives(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(survives(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn lonely_cell_dies() {
        let g = grid(&[&[0, 0, 0, 0], &[0, 1, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        assert!(step(&g).is_empty());
    }

    #[test]
    fn l_tromino_becomes_block() {
        let g = grid(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let expected = grid(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(step(&g), expected);
    }

    #[test]
    fn closures_are_transitions() {
        let clear = |g: &Grid| Grid::new(g.rows(), g.cols()).unwrap();
        let g = grid(&[&[1, 1], &[1, 1]]);
        assert!(clear.next(&g).is_empty());
        assert_eq!(Conway.next(&g), step(&g));
    }
}
