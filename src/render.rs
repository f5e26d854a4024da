//! Turning grids and statistics into terminal text

use crate::colors::ColorState;
use crate::terminal::Terminal;
use crossterm::style::Color;
use lifeterm::engine::{Controller, Grid, Summary, Transition};
use std::collections::BTreeSet;

/// Screen columns per grid cell; a trailing space keeps cells square-ish
pub const CELL_WIDTH: u16 = 2;

/// Draw live cells at the top-left of the back buffer.
pub fn draw_grid(term: &mut Terminal, grid: &Grid, colors: &ColorState, draw_char: char) {
    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            let x = col as i32 * CELL_WIDTH as i32;
            if alive {
                let (color, bold) = colors.cell(grid.count_live_neighbors(row, col));
                term.set(x, row as i32, draw_char, Some(color), bold);
            } else {
                term.set(x, row as i32, '.', Some(Color::DarkGrey), false);
            }
        }
    }
}

/// Grid cell under a screen position, if any
pub fn cell_at(grid: &Grid, x: u16, y: u16) -> Option<(usize, usize)> {
    let (row, col) = (y as usize, (x / CELL_WIDTH) as usize);
    grid.get(row, col).map(|_| (row, col))
}

/// The lines printed under the grid
pub fn status_lines<T: Transition>(controller: &Controller<T>) -> Vec<String> {
    let history = controller.history();
    let summary = controller.stats().summary();
    let state = if controller.is_paused() { "PAUSED" } else { "RUNNING" };

    let mut lines = vec![
        format!(
            "Generation: {} | {} | History: {}/{}",
            controller.generation(),
            state,
            history.position(),
            history.len() - 1
        ),
        format!(
            "Population: {} ({:.1}%) | Growth Rate: {:.2} | Status: {}",
            summary.current_population,
            controller.population_percent(),
            summary.growth_rate,
            summary.status
        ),
    ];
    let found = controller.detected_patterns();
    if !found.is_empty() {
        lines.push(format!("Patterns Detected: {}", pattern_list(&found)));
    }
    lines
}

/// Multi-line analytics report
pub fn analytics_text(summary: &Summary, found: &BTreeSet<&'static str>) -> String {
    let mut text = format!(
        "GAME OF LIFE ANALYTICS\n\
         ─────────────────────────\n\
         Generation:         {}\n\
         Current Population: {}\n\
         Maximum Population: {}\n\
         Minimum Population: {}\n\
         Growth Rate:        {:.3} cells/gen\n\
         Status:             {}\n",
        summary.generation,
        summary.current_population,
        summary.max_population,
        summary.min_population,
        summary.growth_rate,
        summary.status,
    );
    if summary.stable_streak > 0 {
        text.push_str(&format!("Stable for:         {} generations\n", summary.stable_streak));
    }
    if summary.trend.len() > 1 {
        let trend: Vec<String> = summary.trend.iter().map(usize::to_string).collect();
        text.push_str(&format!("Trend: {}\n", trend.join(" → ")));
    }
    text.push_str(&format!(
        "Average Population: {:.1}\nAverage Change:     {:.2}/gen\n",
        summary.average_population, summary.average_change
    ));
    text.push_str("─────────────────────────\n");
    if found.is_empty() {
        text.push_str("No common patterns detected");
    } else {
        text.push_str(&format!("Detected: {}", pattern_list(found)));
    }
    text
}

/// Plain text rendering, one line per row
pub fn grid_to_text(grid: &Grid, live: char, dead: char) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() * 2 + 1));
    for cells in grid.iter_rows() {
        let line: Vec<String> = cells
            .iter()
            .map(|&alive| (if alive { live } else { dead }).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn pattern_list(found: &BTreeSet<&'static str>) -> String {
    found
        .iter()
        .filter_map(|name| lifeterm::engine::patterns::lookup(name))
        .map(|p| p.title())
        .collect::<Vec<_>>()
        .join(", ")
}
