mod app;
mod colors;
mod config;
mod help;
mod render;
mod settings;
mod terminal;

use clap::{Parser, Subcommand};
use config::{GridConfig, PrintConfig, RunConfig};
use lifeterm::engine::patterns;
use settings::Settings;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifeterm")]
#[command(version)]
#[command(about = "lifeterm: Conway's Game of Life in the terminal, with time travel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Grid options shared by `run` and `print`
#[derive(clap::Args)]
struct GridArgs {
    /// Grid rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(short, long)]
    cols: Option<usize>,

    /// Chance each cell starts alive (0.0-1.0)
    #[arg(short, long)]
    density: Option<f64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start from a named pattern on an empty grid instead of random cells
    #[arg(short, long)]
    pattern: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive simulation
    Run {
        #[command(flatten)]
        grid: GridArgs,

        /// Seconds per generation
        #[arg(short, long)]
        time: Option<f32>,

        /// Character used for live cells
        #[arg(long = "char")]
        draw_char: Option<char>,
    },

    /// Advance a number of generations and print the result
    Print {
        #[command(flatten)]
        grid: GridArgs,

        /// Generations to advance before printing
        #[arg(short, long, default_value = "0")]
        generations: u64,

        /// Start from a save file instead of a random grid
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Character used for live cells
        #[arg(long = "char", default_value = "#")]
        draw_char: char,
    },

    /// List the built-in patterns
    Patterns,
}

impl GridArgs {
    fn resolve(self, settings: &Settings) -> GridConfig {
        GridConfig::resolve(settings, self.rows, self.cols, self.density, self.seed, self.pattern)
    }
}

/// Log to a file while the terminal is ours, to stderr otherwise
fn init_logging(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeterm=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            // No log file is better than refusing to start
            if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
            }
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Commands::Run { grid, time, draw_char } => {
            let log_file = settings.files.log_file.clone().unwrap_or_else(Settings::default_log_path);
            init_logging(Some(&log_file));
            let grid = grid.resolve(&settings);
            app::run(RunConfig::resolve(&settings, grid, time, draw_char))?;
        }
        Commands::Print {
            grid,
            generations,
            load,
            draw_char,
        } => {
            init_logging(None);
            app::print(PrintConfig {
                grid: grid.resolve(&settings),
                generations,
                load,
                draw_char,
            })?;
        }
        Commands::Patterns => {
            for p in patterns::all() {
                println!(
                    "{:<22} {:>2}x{:<2}  {:<11} {}",
                    p.name,
                    p.rows(),
                    p.cols(),
                    p.kind.label(),
                    p.description
                );
            }
        }
    }

    Ok(())
}
