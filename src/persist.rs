//! Save files
//!
//! A save is a JSON object with exactly four keys:
//! `{"grid": [[0, 1, ...], ...], "generation": 12, "rows": 25, "cols": 50}`.

use crate::engine::Grid;
use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default save file name, relative to the working directory
pub const DEFAULT_SAVE_FILE: &str = "game_save.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub grid: Vec<Vec<u8>>,
    pub generation: u64,
    pub rows: usize,
    pub cols: usize,
}

impl GridState {
    pub fn from_grid(grid: &Grid, generation: u64) -> Self {
        Self {
            grid: grid
                .iter_rows()
                .map(|row| row.iter().map(|&alive| u8::from(alive)).collect())
                .collect(),
            generation,
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }

    /// Check the declared shape against the cell data.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.grid.len() != self.rows {
            return Err(LifeError::malformed(format!(
                "declares {} rows but has {}",
                self.rows,
                self.grid.len()
            )));
        }
        if let Some((i, row)) = self.grid.iter().enumerate().find(|(_, r)| r.len() != self.cols) {
            return Err(LifeError::malformed(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                self.cols
            )));
        }
        if self.grid.iter().flatten().any(|&c| c > 1) {
            return Err(LifeError::malformed("cells must be 0 or 1"));
        }
        Ok(())
    }

    pub fn into_grid(self) -> Result<Grid> {
        self.validate()?;
        Grid::from_rows(
            self.grid
                .into_iter()
                .map(|row| row.into_iter().map(|c| c == 1).collect())
                .collect(),
        )
    }
}

pub fn save_state(path: &Path, state: &GridState) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, state)?;
    out.flush()?;
    tracing::info!(path = %path.display(), generation = state.generation, "game saved");
    Ok(())
}

/// Read and validate a save file.
pub fn load_state(path: &Path) -> Result<GridState> {
    let content = fs::read_to_string(path)?;
    let state: GridState = serde_json::from_str(&content)?;
    state.validate()?;
    tracing::info!(path = %path.display(), generation = state.generation, "game loaded");
    Ok(state)
}
