//! Bounded generation history with a replay cursor

use super::grid::Grid;
use super::rules::Transition;

/// Default number of snapshots kept before the oldest is evicted
pub const DEFAULT_CAPACITY: usize = 1000;

/// Past generations plus a cursor into them.
///
/// Stepping forward from anywhere but the newest entry replays the stored
/// snapshot; only stepping past the newest entry computes anything. The
/// cursor always satisfies `position < len`.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<Grid>,
    position: usize,
    capacity: usize,
    /// Generation number of `snapshots[0]`
    first_generation: u64,
}

impl History {
    pub fn new(seed: Grid, first_generation: u64) -> Self {
        Self::with_capacity(seed, first_generation, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(seed: Grid, first_generation: u64, capacity: usize) -> Self {
        Self {
            snapshots: vec![seed],
            position: 0,
            capacity: capacity.max(1),
            first_generation,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.snapshots[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Generation number of the snapshot under the cursor.
    ///
    /// Saturates at `u64::MAX`; saves may carry any generation.
    pub fn generation(&self) -> u64 {
        self.first_generation.saturating_add(self.position as u64)
    }

    pub fn is_at_newest(&self) -> bool {
        self.position + 1 == self.snapshots.len()
    }

    /// Redo a stored generation, or compute and append a new one.
    pub fn step_forward<T: Transition + ?Sized>(&mut self, transition: &T) -> &Grid {
        if !self.is_at_newest() {
            self.position += 1;
            return self.current();
        }

        let next = transition.next(self.current());
        self.snapshots.push(next);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
            self.first_generation = self.first_generation.saturating_add(1);
            tracing::debug!(generation = self.first_generation, "history full, evicted oldest snapshot");
        } else {
            self.position += 1;
        }
        self.current()
    }

    /// Move back one generation; stays put at the oldest entry.
    pub fn step_backward(&mut self) -> &Grid {
        if self.position > 0 {
            self.position -= 1;
        }
        self.current()
    }

    pub fn reset(&mut self, seed: Grid, first_generation: u64) {
        self.snapshots.clear();
        self.snapshots.push(seed);
        self.position = 0;
        self.first_generation = first_generation;
    }

    /// Store an edited grid at the cursor.
    ///
    /// Entries after the cursor were computed from the old grid, so they
    /// are dropped and the next forward step recomputes from the edit.
    pub fn replace_current(&mut self, grid: Grid) {
        self.snapshots.truncate(self.position + 1);
        self.snapshots[self.position] = grid;
    }

    /// Up to `n` snapshots ending at the cursor, oldest first
    pub fn recent(&self, n: usize) -> &[Grid] {
        let end = self.position + 1;
        &self.snapshots[end.saturating_sub(n)..end]
    }
}
