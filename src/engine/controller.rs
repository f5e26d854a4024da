//! The single owner of simulation state

use super::grid::Grid;
use super::history::History;
use super::patterns;
use super::rules::{Conway, Transition};
use super::stats::Stats;
use crate::error::Result;
use crate::persist::GridState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Drives the simulation.
///
/// Grid, history and statistics change together in every call, and each
/// call hands back the grid to draw. Front ends hold one `Controller` and
/// go through nothing else.
pub struct Controller<T: Transition = Conway> {
    history: History,
    stats: Stats,
    transition: T,
    rng: StdRng,
    paused: bool,
}

impl Controller<Conway> {
    /// Random grid from an optional seed
    pub fn random(rows: usize, cols: usize, density: f64, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::random(rows, cols, density, &mut rng)?;
        Ok(Self::build(grid, 0, Conway, rng))
    }

    pub fn from_grid(grid: Grid, generation: u64) -> Self {
        Self::build(grid, generation, Conway, StdRng::from_entropy())
    }
}

impl<T: Transition> Controller<T> {
    /// Controller stepping with a custom transition
    pub fn with_transition(grid: Grid, transition: T) -> Self {
        Self::build(grid, 0, transition, StdRng::from_entropy())
    }

    fn build(grid: Grid, generation: u64, transition: T, rng: StdRng) -> Self {
        Self {
            stats: Stats::seeded(&grid, generation),
            history: History::new(grid, generation),
            transition,
            rng,
            paused: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.history.current()
    }

    pub fn generation(&self) -> u64 {
        self.history.generation()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn transition(&self) -> &T {
        &self.transition
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Step forward one generation, replaying history when possible.
    pub fn advance(&mut self) -> &Grid {
        self.history.step_forward(&self.transition);
        self.stats.update(self.history.current(), self.history.generation());
        self.history.current()
    }

    /// Step back one generation; stays on the oldest kept snapshot.
    pub fn retreat(&mut self) -> &Grid {
        if self.history.position() > 0 {
            self.history.step_backward();
            self.stats.update(self.history.current(), self.history.generation());
        }
        self.history.current()
    }

    /// Timer tick: advances unless paused.
    pub fn tick(&mut self) -> Option<&Grid> {
        if self.paused {
            None
        } else {
            Some(self.advance())
        }
    }

    /// Start over with a fresh random grid.
    pub fn reset(&mut self, rows: usize, cols: usize, density: f64) -> Result<&Grid> {
        let grid = Grid::random(rows, cols, density, &mut self.rng)?;
        tracing::info!(rows, cols, density, "reset with random grid");
        self.replace(grid, 0);
        Ok(self.history.current())
    }

    /// Kill every cell, keeping the grid size.
    pub fn clear(&mut self) -> &Grid {
        let current = self.grid();
        // dimensions come from an existing grid, so they are valid
        let blank = Grid::new(current.rows(), current.cols()).unwrap_or_else(|_| current.clone());
        self.replace(blank, 0);
        self.history.current()
    }

    /// Stamp a named pattern in the middle of the current grid and pause.
    ///
    /// Unknown names leave everything untouched and return `None`.
    pub fn load_pattern(&mut self, name: &str) -> Option<&Grid> {
        let Some(pattern) = patterns::lookup(name) else {
            tracing::warn!(name, "unknown pattern");
            return None;
        };
        let (row, col) = patterns::centered_offset(self.grid(), pattern);
        let grid = patterns::place(self.grid(), pattern, row, col);
        tracing::info!(pattern = pattern.name, row, col, "pattern placed");
        self.replace(grid, 0);
        self.paused = true;
        Some(self.history.current())
    }

    /// Flip one cell of the current generation.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<&Grid> {
        let edited = self.grid().toggled(row, col)?;
        self.history.replace_current(edited);
        self.stats.update(self.history.current(), self.history.generation());
        Ok(self.history.current())
    }

    /// Replace the whole simulation with a saved state.
    pub fn load_state(&mut self, state: GridState) -> Result<&Grid> {
        let generation = state.generation;
        let grid = state.into_grid()?;
        self.replace(grid, generation);
        Ok(self.history.current())
    }

    pub fn to_state(&self) -> GridState {
        GridState::from_grid(self.grid(), self.generation())
    }

    pub fn detected_patterns(&self) -> BTreeSet<&'static str> {
        patterns::find_in_grid(self.grid())
    }

    /// Share of live cells, 0-100
    pub fn population_percent(&self) -> f64 {
        let grid = self.grid();
        grid.population() as f64 * 100.0 / (grid.rows() * grid.cols()) as f64
    }

    fn replace(&mut self, grid: Grid, generation: u64) {
        self.stats = Stats::seeded(&grid, generation);
        self.history.reset(grid, generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    #[test]
    fn seeded_controllers_agree() {
        let a = Controller::random(12, 20, 0.3, Some(9)).unwrap();
        let b = Controller::random(12, 20, 0.3, Some(9)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.generation(), 0);
        assert_eq!(a.stats().samples().len(), 1);
    }

    #[test]
    fn zero_size_reset_is_rejected() {
        let mut c = Controller::random(5, 5, 0.5, Some(1)).unwrap();
        let before = c.grid().clone();
        assert!(matches!(c.reset(0, 5, 0.5), Err(LifeError::InvalidDimension { .. })));
        assert_eq!(c.grid(), &before);
    }

    #[test]
    fn pause_blocks_ticks() {
        let mut c = Controller::random(6, 6, 0.5, Some(2)).unwrap();
        c.pause();
        assert!(c.tick().is_none());
        assert_eq!(c.generation(), 0);
        assert!(!c.toggle_pause());
        assert!(c.tick().is_some());
        assert_eq!(c.generation(), 1);
    }

    #[test]
    fn retreat_at_seed_leaves_stats_alone() {
        let mut c = Controller::random(6, 6, 0.5, Some(3)).unwrap();
        c.retreat();
        assert_eq!(c.stats().samples().len(), 1);
    }

    #[test]
    fn unknown_pattern_changes_nothing() {
        let mut c = Controller::random(10, 10, 0.5, Some(4)).unwrap();
        c.advance();
        let before = c.grid().clone();
        assert!(c.load_pattern("nope").is_none());
        assert_eq!(c.grid(), &before);
        assert_eq!(c.generation(), 1);
        assert!(!c.is_paused());
    }

    #[test]
    fn pattern_load_resets_and_pauses() {
        let mut c = Controller::from_grid(Grid::new(10, 10).unwrap(), 0);
        c.advance();
        c.advance();
        let grid = c.load_pattern("Block").unwrap().clone();
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.get(4, 4), Some(true));
        assert_eq!(grid.get(5, 5), Some(true));
        assert_eq!(c.generation(), 0);
        assert_eq!(c.history().len(), 1);
        assert!(c.is_paused());
        assert!(c.detected_patterns().contains("block"));
    }

    #[test]
    fn toggle_updates_stats_and_bounds() {
        let mut c = Controller::from_grid(Grid::new(4, 4).unwrap(), 0);
        c.toggle(1, 1).unwrap();
        assert_eq!(c.stats().current_population(), 1);
        assert_eq!(c.grid().get(1, 1), Some(true));
        assert!(matches!(c.toggle(4, 0), Err(LifeError::OutOfRange { .. })));
        assert!((c.population_percent() - 6.25).abs() < 1e-9);
    }

    #[test]
    fn clear_keeps_size() {
        let mut c = Controller::random(7, 9, 1.0, Some(5)).unwrap();
        c.advance();
        let grid = c.clear();
        assert!(grid.is_empty());
        assert_eq!((grid.rows(), grid.cols()), (7, 9));
        assert_eq!(c.generation(), 0);
        assert_eq!(c.stats().classify(), crate::engine::Status::Extinct);
    }

    #[test]
    fn state_round_trip_keeps_generation() {
        let mut c = Controller::random(8, 8, 0.4, Some(6)).unwrap();
        for _ in 0..3 {
            c.advance();
        }
        let state = c.to_state();
        let mut other = Controller::random(3, 3, 0.0, Some(7)).unwrap();
        other.load_state(state).unwrap();
        assert_eq!(other.grid(), c.grid());
        assert_eq!(other.generation(), 3);
        other.advance();
        assert_eq!(other.generation(), 4);
    }
}
