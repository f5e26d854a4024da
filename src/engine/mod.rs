//! Simulation core
//!
//! A toroidal grid, the Conway rule, a replayable history, the pattern
//! library and population statistics, tied together by [`Controller`].

pub mod controller;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod rules;
pub mod stats;

pub use controller::Controller;
pub use grid::Grid;
pub use history::History;
pub use patterns::{Pattern, PatternKind};
pub use rules::{step, Conway, Transition};
pub use stats::{Stats, Status, Summary};
