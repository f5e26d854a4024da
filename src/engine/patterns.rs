//! Named pattern library, placement and detection

use super::grid::Grid;
use std::collections::BTreeSet;

/// How a pattern behaves over time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    StillLife,
    Oscillator,
    Spaceship,
    Gun,
}

impl PatternKind {
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::StillLife => "still life",
            PatternKind::Oscillator => "oscillator",
            PatternKind::Spaceship => "spaceship",
            PatternKind::Gun => "gun",
        }
    }
}

/// A fixed rectangular template. Every row has the same width.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub kind: PatternKind,
    pub description: &'static str,
    pub cells: &'static [&'static [u8]],
}

impl Pattern {
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, |r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    #[inline]
    fn alive(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] != 0
    }

    /// Display name, e.g. "Gosper Gun"
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const GLIDER: Pattern = Pattern {
    name: "glider",
    kind: PatternKind::Spaceship,
    description: "Travels diagonally across the grid",
    cells: &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
};

const BLINKER: Pattern = Pattern {
    name: "blinker",
    kind: PatternKind::Oscillator,
    description: "Oscillates between horizontal and vertical",
    cells: &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]],
};

const BLOCK: Pattern = Pattern {
    name: "block",
    kind: PatternKind::StillLife,
    description: "Static 2x2 square",
    cells: &[&[1, 1], &[1, 1]],
};

const BEEHIVE: Pattern = Pattern {
    name: "beehive",
    kind: PatternKind::StillLife,
    description: "Static hexagonal shape",
    cells: &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 1, 0]],
};

const LOAF: Pattern = Pattern {
    name: "loaf",
    kind: PatternKind::StillLife,
    description: "Static asymmetric shape",
    cells: &[&[0, 1, 1, 0], &[1, 0, 0, 1], &[0, 1, 0, 1], &[0, 0, 1, 0]],
};

const BOAT: Pattern = Pattern {
    name: "boat",
    kind: PatternKind::StillLife,
    description: "Small static shape",
    cells: &[&[1, 1, 0], &[1, 0, 1], &[0, 1, 0]],
};

const TUB: Pattern = Pattern {
    name: "tub",
    kind: PatternKind::StillLife,
    description: "Small ring-shaped still life",
    cells: &[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]],
};

const BEACON: Pattern = Pattern {
    name: "beacon",
    kind: PatternKind::Oscillator,
    description: "Two blocks blinking with period 2",
    cells: &[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1], &[0, 0, 1, 1]],
};

const TOAD: Pattern = Pattern {
    name: "toad",
    kind: PatternKind::Oscillator,
    description: "Oscillates with period 2",
    cells: &[&[0, 1, 1, 1], &[1, 1, 1, 0]],
};

const PULSAR: Pattern = Pattern {
    name: "pulsar",
    kind: PatternKind::Oscillator,
    description: "Large oscillator with period 3",
    cells: &[
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    ],
};

const GOSPER_GUN: Pattern = Pattern {
    name: "gosper_gun",
    kind: PatternKind::Gun,
    description: "Emits a new glider every 30 generations",
    cells: &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
};

const PENTA_DECATHLON: Pattern = Pattern {
    name: "penta_decathlon",
    kind: PatternKind::Oscillator,
    description: "Oscillates with period 15",
    cells: &[
        &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
        &[1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
        &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    ],
};

const LIGHTWEIGHT_SPACESHIP: Pattern = Pattern {
    name: "lightweight_spaceship",
    kind: PatternKind::Spaceship,
    description: "Travels horizontally across the grid",
    cells: &[&[1, 0, 0, 1, 0], &[0, 0, 0, 0, 1], &[1, 0, 0, 0, 1], &[0, 1, 1, 1, 1]],
};

/// Library in menu order
static LIBRARY: [&Pattern; 13] = [
    &GLIDER,
    &BLINKER,
    &BLOCK,
    &BEEHIVE,
    &LOAF,
    &BOAT,
    &TUB,
    &BEACON,
    &TOAD,
    &PULSAR,
    &GOSPER_GUN,
    &PENTA_DECATHLON,
    &LIGHTWEIGHT_SPACESHIP,
];

/// Patterns that sit still (or blink in place), so an exact scan can find them
static DETECTABLE: [&Pattern; 8] = [&BLOCK, &BEEHIVE, &LOAF, &BOAT, &TUB, &BLINKER, &TOAD, &BEACON];

pub fn all() -> &'static [&'static Pattern] {
    &LIBRARY
}

/// Case-insensitive lookup; `-` and spaces count as `_`.
pub fn lookup(name: &str) -> Option<&'static Pattern> {
    let key: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    let key = match key.as_str() {
        "glider_gun" | "gosper_glider_gun" => "gosper_gun",
        "lwss" => "lightweight_spaceship",
        "pentadecathlon" => "penta_decathlon",
        other => other,
    };
    LIBRARY.iter().copied().find(|p| p.name == key)
}

/// Stamp `pattern` onto a copy of `grid`, wrapping around the edges.
///
/// Covered cells take the pattern's value, so dead template cells clear
/// whatever was underneath.
pub fn place(grid: &Grid, pattern: &Pattern, start_row: isize, start_col: isize) -> Grid {
    let mut next = grid.clone();
    if pattern.is_empty() {
        return next;
    }
    let rows = grid.rows() as isize;
    let cols = grid.cols() as isize;
    for (i, line) in pattern.cells.iter().enumerate() {
        for (j, &cell) in line.iter().enumerate() {
            let r = (start_row + i as isize).rem_euclid(rows) as usize;
            let c = (start_col + j as isize).rem_euclid(cols) as usize;
            next.set(r, c, cell != 0);
        }
    }
    next
}

/// Offset that centers `pattern` on `grid` (floor division, may be negative).
pub fn centered_offset(grid: &Grid, pattern: &Pattern) -> (isize, isize) {
    let row = (grid.rows() as isize - pattern.rows() as isize).div_euclid(2);
    let col = (grid.cols() as isize - pattern.cols() as isize).div_euclid(2);
    (row, col)
}

/// True if the template appears anywhere in the grid without wrapping.
pub fn occurs_in(grid: &Grid, pattern: &Pattern) -> bool {
    let (p_rows, p_cols) = (pattern.rows(), pattern.cols());
    if pattern.is_empty() || p_rows > grid.rows() || p_cols > grid.cols() {
        return false;
    }
    (0..=grid.rows() - p_rows).any(|i| {
        (0..=grid.cols() - p_cols).any(|j| {
            (0..p_rows).all(|pi| (0..p_cols).all(|pj| grid.get(i + pi, j + pj) == Some(pattern.alive(pi, pj))))
        })
    })
}

/// Names of the still lifes and oscillators present in the grid
pub fn find_in_grid(grid: &Grid) -> BTreeSet<&'static str> {
    DETECTABLE
        .iter()
        .filter(|p| occurs_in(grid, p))
        .map(|p| p.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rules::step;

    fn empty(rows: usize, cols: usize) -> Grid {
        Grid::new(rows, cols).unwrap()
    }

    #[test]
    fn library_rows_are_rectangular() {
        for p in all() {
            assert!(!p.is_empty(), "{}", p.name);
            assert!(p.cells.iter().all(|r| r.len() == p.cols()), "{} is ragged", p.name);
        }
        assert_eq!(all().len(), 13);
    }

    #[test]
    fn lookup_is_forgiving() {
        assert_eq!(lookup("GLIDER").map(|p| p.name), Some("glider"));
        assert_eq!(lookup("Gosper Gun").map(|p| p.name), Some("gosper_gun"));
        assert_eq!(lookup("glider-gun").map(|p| p.name), Some("gosper_gun"));
        assert_eq!(lookup("lwss").map(|p| p.name), Some("lightweight_spaceship"));
        assert!(lookup("unicorn").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn titles() {
        assert_eq!(GOSPER_GUN.title(), "Gosper Gun");
        assert_eq!(BLOCK.title(), "Block");
    }

    #[test]
    fn placement_overwrites_cells() {
        let full = empty(4, 4);
        let full = (0..4).fold(full, |g, r| (0..4).fold(g, |g, c| g.with_cell(r, c, true).unwrap()));
        let stamped = place(&full, &TUB, 0, 0);
        // tub corners are dead and must clear the live cells beneath
        assert_eq!(stamped.get(0, 0), Some(false));
        assert_eq!(stamped.get(1, 1), Some(false));
        assert_eq!(stamped.get(0, 1), Some(true));
        assert_eq!(stamped.get(3, 3), Some(true));
    }

    #[test]
    fn placement_wraps_at_corner() {
        let g = place(&empty(6, 8), &TUB, 5, 7);
        // tub (0,1) -> (5, 0); (1,0) -> (0, 7); (1,2) -> (0, 1); (2,1) -> (1, 0)
        assert_eq!(g.population(), 4);
        for (r, c) in [(5, 0), (0, 7), (0, 1), (1, 0)] {
            assert_eq!(g.get(r, c), Some(true), "({r}, {c})");
        }
    }

    #[test]
    fn negative_offsets_wrap() {
        let g = place(&empty(5, 5), &BLOCK, -1, -1);
        for (r, c) in [(4, 4), (4, 0), (0, 4), (0, 0)] {
            assert_eq!(g.get(r, c), Some(true));
        }
    }

    #[test]
    fn centered_offsets() {
        assert_eq!(centered_offset(&empty(25, 50), &GLIDER), (11, 23));
        assert_eq!(centered_offset(&empty(10, 10), &GOSPER_GUN), (0, -13));
    }

    #[test]
    fn detects_still_lifes() {
        let g = place(&empty(10, 10), &BEEHIVE, 2, 3);
        let found = find_in_grid(&g);
        assert!(found.contains("beehive"));
        assert!(!found.contains("block"));
    }

    #[test]
    fn detection_does_not_wrap() {
        let g = place(&empty(6, 6), &BLOCK, 5, 5);
        assert!(!occurs_in(&g, &BLOCK));
    }

    #[test]
    fn oversized_template_never_matches() {
        let g = empty(2, 2);
        assert!(!occurs_in(&g, &BEACON));
        assert!(find_in_grid(&g).is_empty());
    }

    #[test]
    fn still_lifes_are_still() {
        for p in all().iter().filter(|p| p.kind == PatternKind::StillLife) {
            let g = place(&empty(10, 10), p, 3, 3);
            assert_eq!(step(&g), g, "{} moved", p.name);
        }
    }
}
