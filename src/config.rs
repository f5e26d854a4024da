use crate::settings::Settings;
use lifeterm::persist::DEFAULT_SAVE_FILE;
use std::path::PathBuf;

pub const DEFAULT_ROWS: usize = 25;
pub const DEFAULT_COLS: usize = 50;
pub const DEFAULT_DENSITY: f64 = 0.25;
pub const DEFAULT_TIME_STEP: f32 = 0.3;
pub const DEFAULT_DRAW_CHAR: char = '■';

/// Grid shape and starting content, shared by interactive and print modes
#[derive(Clone, Debug)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub density: f64,
    pub seed: Option<u64>,
    pub pattern: Option<String>,
}

/// Configuration for an interactive session
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub time_step: f32,
    pub draw_char: char,
    pub color_scheme: u8,
    pub save_file: PathBuf,
    pub export_dir: PathBuf,
}

/// Configuration for headless printing
#[derive(Clone, Debug)]
pub struct PrintConfig {
    pub grid: GridConfig,
    pub generations: u64,
    pub load: Option<PathBuf>,
    pub draw_char: char,
}

impl GridConfig {
    /// CLI values win, then the settings file, then built-in defaults
    pub fn resolve(
        settings: &Settings,
        rows: Option<usize>,
        cols: Option<usize>,
        density: Option<f64>,
        seed: Option<u64>,
        pattern: Option<String>,
    ) -> Self {
        Self {
            rows: rows.or(settings.grid.rows).unwrap_or(DEFAULT_ROWS).max(1),
            cols: cols.or(settings.grid.cols).unwrap_or(DEFAULT_COLS).max(1),
            density: density.or(settings.grid.density).unwrap_or(DEFAULT_DENSITY).clamp(0.0, 1.0),
            seed,
            pattern,
        }
    }
}

impl RunConfig {
    pub fn resolve(settings: &Settings, grid: GridConfig, time_step: Option<f32>, draw_char: Option<char>) -> Self {
        Self {
            grid,
            time_step: time_step.or(settings.run.time_step).unwrap_or(DEFAULT_TIME_STEP).max(0.005),
            draw_char: draw_char.or(settings.run.draw_char).unwrap_or(DEFAULT_DRAW_CHAR),
            color_scheme: settings.run.color_scheme.unwrap_or(0).min(9),
            save_file: settings
                .files
                .save_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE)),
            export_dir: settings.files.export_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
