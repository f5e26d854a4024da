//! Population statistics and stability classification

use super::grid::Grid;
use std::collections::VecDeque;
use std::fmt;

/// Number of (generation, population) samples retained
pub const SAMPLE_CAPACITY: usize = 1000;
/// Samples considered by the default growth rate
pub const GROWTH_WINDOW: usize = 10;
/// Unchanged updates before a population counts as stable
pub const STABLE_THRESHOLD: u32 = 5;
/// Growth rate magnitude below which a population is "near stable"
const NEAR_STABLE_RATE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Extinct,
    Stable,
    NearStable,
    Active,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Extinct => "Extinct",
            Status::Stable => "Stable",
            Status::NearStable => "Near Stable",
            Status::Active => "Active",
        })
    }
}

/// Snapshot of everything the analytics view shows
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub generation: u64,
    pub current_population: usize,
    pub max_population: usize,
    /// Smallest non-zero population seen, 0 if there never was one
    pub min_population: usize,
    pub growth_rate: f64,
    pub status: Status,
    pub stable_streak: u32,
    pub average_population: f64,
    pub average_change: f64,
    /// Last few populations, oldest first
    pub trend: Vec<usize>,
}

/// Running population statistics.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    samples: VecDeque<(u64, usize)>,
    generation: u64,
    max_population: usize,
    min_population: Option<usize>,
    stable_streak: u32,
    last_population: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker already holding one sample for `grid`
    pub fn seeded(grid: &Grid, generation: u64) -> Self {
        let mut stats = Self::new();
        stats.update(grid, generation);
        stats
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn update(&mut self, grid: &Grid, generation: u64) {
        self.record(generation, grid.population());
    }

    /// Record a population directly
    pub fn record(&mut self, generation: u64, population: usize) {
        if self.samples.len() == SAMPLE_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back((generation, population));
        self.generation = generation;
        self.max_population = self.max_population.max(population);
        if population > 0 {
            self.min_population = Some(self.min_population.map_or(population, |m| m.min(population)));
        }
        // the very first sample compares against an implicit zero
        if population == self.last_population {
            self.stable_streak += 1;
        } else {
            self.stable_streak = 0;
        }
        self.last_population = population;
    }

    pub fn current_population(&self) -> usize {
        self.samples.back().map_or(0, |&(_, p)| p)
    }

    pub fn max_population(&self) -> usize {
        self.max_population
    }

    pub fn min_population(&self) -> Option<usize> {
        self.min_population
    }

    pub fn stable_streak(&self) -> u32 {
        self.stable_streak
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &(u64, usize)> + '_ {
        self.samples.iter()
    }

    /// Population change per generation across the last `window` samples.
    ///
    /// Zero with fewer than two samples or a non-positive generation span
    /// (stepping backwards makes the span negative).
    pub fn growth_rate(&self, window: usize) -> f64 {
        let n = self.samples.len();
        let window = window.min(n);
        if window < 2 {
            return 0.0;
        }
        let (first_gen, first_pop) = self.samples[n - window];
        let (last_gen, last_pop) = self.samples[n - 1];
        if last_gen <= first_gen {
            return 0.0;
        }
        (last_pop as f64 - first_pop as f64) / (last_gen - first_gen) as f64
    }

    pub fn is_extinct(&self) -> bool {
        self.current_population() == 0
    }

    pub fn is_stable(&self) -> bool {
        self.stable_streak >= STABLE_THRESHOLD
    }

    pub fn classify(&self) -> Status {
        if self.is_extinct() {
            Status::Extinct
        } else if self.is_stable() {
            Status::Stable
        } else if self.growth_rate(GROWTH_WINDOW).abs() < NEAR_STABLE_RATE {
            Status::NearStable
        } else {
            Status::Active
        }
    }

    pub fn summary(&self) -> Summary {
        let pops: Vec<usize> = self.samples.iter().map(|&(_, p)| p).collect();
        let average_population = if pops.is_empty() {
            0.0
        } else {
            pops.iter().sum::<usize>() as f64 / pops.len() as f64
        };
        let average_change = if pops.len() < 2 {
            0.0
        } else {
            let total: usize = pops.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
            total as f64 / (pops.len() - 1) as f64
        };
        Summary {
            generation: self.generation,
            current_population: self.current_population(),
            max_population: self.max_population,
            min_population: self.min_population.unwrap_or(0),
            growth_rate: self.growth_rate(GROWTH_WINDOW),
            status: self.classify(),
            stable_streak: self.stable_streak,
            average_population,
            average_change,
            trend: pops[pops.len().saturating_sub(GROWTH_WINDOW)..].to_vec(),
        }
    }
}
