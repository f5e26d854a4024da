//! Error types for the simulation core and its file collaborators.

use thiserror::Error;

/// Everything that can go wrong in lifeterm.
///
/// The engine itself only raises the contract variants (`InvalidDimension`,
/// `OutOfRange`, `RaggedRows`). The rest come from save/load and export.
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("grid rows have different widths")]
    RaggedRows,

    /// Save data parsed as JSON but does not describe a valid grid
    #[error("malformed save data: {0}")]
    Malformed(String),

    #[error("nothing to export")]
    NothingToExport,

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    #[must_use]
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }
}
