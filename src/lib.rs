//! Conway's Game of Life with time travel.
//!
//! The [`engine`] module holds the simulation; [`persist`] and [`export`]
//! move grids to and from files. The interactive terminal front end lives
//! in the binary.

pub mod engine;
pub mod error;
pub mod export;
pub mod persist;

pub use engine::{Controller, Grid};
pub use error::{LifeError, Result};
