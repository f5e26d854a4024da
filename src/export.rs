//! Exports: PNG snapshots, animated GIFs of recent history, and a
//! standalone HTML page that keeps simulating in the browser

use crate::engine::Grid;
use crate::error::{LifeError, Result};
use crate::persist::GridState;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Pixels per cell edge in exported images
pub const DEFAULT_CELL_SIZE: u32 = 10;
/// Milliseconds each GIF frame is shown
pub const DEFAULT_FRAME_DELAY_MS: u32 = 200;
/// Most frames written to a GIF; older history is skipped
pub const MAX_GIF_FRAMES: usize = 50;

const LIVE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const DEAD: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Black live cells on white, `cell_size` pixels square each
pub fn render_image(grid: &Grid, cell_size: u32) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let width = grid.cols() as u32 * cell_size;
    let height = grid.rows() as u32 * cell_size;
    let mut img = RgbaImage::from_pixel(width, height, DEAD);
    for (row, cells) in grid.iter_rows().enumerate() {
        for (col, _) in cells.iter().enumerate().filter(|(_, alive)| **alive) {
            let x0 = col as u32 * cell_size;
            let y0 = row as u32 * cell_size;
            for y in y0..y0 + cell_size {
                for x in x0..x0 + cell_size {
                    img.put_pixel(x, y, LIVE);
                }
            }
        }
    }
    img
}

pub fn export_png(path: &Path, grid: &Grid, cell_size: u32) -> Result<()> {
    render_image(grid, cell_size).save_with_format(path, ImageFormat::Png)?;
    tracing::info!(path = %path.display(), "PNG exported");
    Ok(())
}

/// Write the last [`MAX_GIF_FRAMES`] grids as a looping animation.
///
/// Returns the number of frames written.
pub fn export_gif(path: &Path, grids: &[Grid], cell_size: u32, delay_ms: u32) -> Result<usize> {
    if grids.is_empty() {
        return Err(LifeError::NothingToExport);
    }
    let frames: Vec<Frame> = grids[grids.len().saturating_sub(MAX_GIF_FRAMES)..]
        .iter()
        .map(|grid| Frame::from_parts(render_image(grid, cell_size), 0, 0, Delay::from_numer_denom_ms(delay_ms, 1)))
        .collect();
    let count = frames.len();

    let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
    encoder.set_repeat(Repeat::Infinite)?;
    encoder.encode_frames(frames)?;
    tracing::info!(path = %path.display(), frames = count, "GIF exported");
    Ok(count)
}

/// Pixels per cell on the exported page's canvas
pub const HTML_CELL_SIZE: usize = 8;

const HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Game of Life</title>
<style>
  body { font-family: sans-serif; background: #f0f0f0; margin: 20px; }
  main { max-width: 1000px; margin: 0 auto; background: #fff; padding: 20px; border-radius: 8px; }
  canvas { display: block; margin: 16px auto; border: 2px solid #333; cursor: pointer; }
  .info, .controls { text-align: center; color: #555; }
  button { margin: 4px; padding: 8px 16px; border: none; border-radius: 4px; background: #4caf50; color: #fff; }
</style>
</head>
<body>
<main>
  <h1 class="info">Conway's Game of Life</h1>
  <p class="info">Grid: __ROWS__ &times; __COLS__ | Live cells: <span id="live">0</span> | Generation: <span id="gen">0</span></p>
  <canvas id="board" width="__WIDTH__" height="__HEIGHT__"></canvas>
  <div class="controls">
    <button id="play">Play</button>
    <button id="step">Step</button>
    <button id="reset">Reset</button>
    <button id="clear">Clear</button>
    <button id="random">Random</button>
  </div>
  <p class="info">Click a cell to toggle it.</p>
</main>
<script>
const rows = __ROWS__, cols = __COLS__, size = __CELL__;
const initial = __GRID__;
const ctx = document.getElementById("board").getContext("2d");
let grid = initial.map(r => r.slice());
let generation = 0, timer = null;

function draw() {
  ctx.fillStyle = "#fff";
  ctx.fillRect(0, 0, cols * size, rows * size);
  ctx.fillStyle = "#000";
  let live = 0;
  for (let i = 0; i < rows; i++)
    for (let j = 0; j < cols; j++)
      if (grid[i][j]) { ctx.fillRect(j * size, i * size, size, size); live++; }
  document.getElementById("live").textContent = live;
  document.getElementById("gen").textContent = generation;
}

function step() {
  const next = grid.map(r => r.map(() => 0));
  for (let i = 0; i < rows; i++)
    for (let j = 0; j < cols; j++) {
      let n = 0;
      for (let dr = -1; dr <= 1; dr++)
        for (let dc = -1; dc <= 1; dc++)
          if (dr || dc) n += grid[(i + dr + rows) % rows][(j + dc + cols) % cols];
      next[i][j] = (n === 3 || (n === 2 && grid[i][j])) ? 1 : 0;
    }
  grid = next;
  generation++;
  draw();
}

function stop() { clearInterval(timer); timer = null; document.getElementById("play").textContent = "Play"; }
function restart(cells) { stop(); grid = cells; generation = 0; draw(); }

document.getElementById("play").onclick = () => {
  if (timer) { stop(); return; }
  timer = setInterval(step, 200);
  document.getElementById("play").textContent = "Pause";
};
document.getElementById("step").onclick = step;
document.getElementById("reset").onclick = () => restart(initial.map(r => r.slice()));
document.getElementById("clear").onclick = () => restart(grid.map(r => r.map(() => 0)));
document.getElementById("random").onclick = () => restart(grid.map(r => r.map(() => Math.random() < 0.25 ? 1 : 0)));
document.getElementById("board").onclick = e => {
  const rect = e.target.getBoundingClientRect();
  const i = Math.floor((e.clientY - rect.top) / size), j = Math.floor((e.clientX - rect.left) / size);
  if (i >= 0 && i < rows && j >= 0 && j < cols) { grid[i][j] = 1 - grid[i][j]; draw(); }
};
draw();
</script>
</body>
</html>
"##;

/// Self-contained page with the grid embedded as a JSON array of 0/1 rows
pub fn render_html(grid: &Grid) -> Result<String> {
    let cells = serde_json::to_string(&GridState::from_grid(grid, 0).grid)?;
    Ok(HTML_TEMPLATE
        .replace("__ROWS__", &grid.rows().to_string())
        .replace("__COLS__", &grid.cols().to_string())
        .replace("__WIDTH__", &(grid.cols() * HTML_CELL_SIZE).to_string())
        .replace("__HEIGHT__", &(grid.rows() * HTML_CELL_SIZE).to_string())
        .replace("__CELL__", &HTML_CELL_SIZE.to_string())
        .replace("__GRID__", &cells))
}

pub fn export_html(path: &Path, grid: &Grid) -> Result<()> {
    fs::write(path, render_html(grid)?)?;
    tracing::info!(path = %path.display(), "HTML exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_matches_grid() {
        let grid = Grid::new(2, 3).unwrap().with_cell(1, 2, true).unwrap();
        let img = render_image(&grid, 4);
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(8, 4), &LIVE);
        assert_eq!(img.get_pixel(11, 7), &LIVE);
        assert_eq!(img.get_pixel(7, 4), &DEAD);
        assert_eq!(img.get_pixel(0, 0), &DEAD);
    }

    #[test]
    fn page_embeds_grid_and_size() {
        let grid = Grid::new(2, 3).unwrap().with_cell(0, 1, true).unwrap();
        let html = render_html(&grid).unwrap();
        assert!(html.contains("const initial = [[0,1,0],[0,0,0]];"));
        assert!(html.contains("const rows = 2, cols = 3, size = 8;"));
        assert!(html.contains(r#"width="24" height="16""#));
        assert!(!html.contains("__"));
    }

    #[test]
    fn empty_history_is_an_error() {
        let dir = std::env::temp_dir().join("lifeterm-export-empty.gif");
        assert!(matches!(export_gif(&dir, &[], 4, 100), Err(LifeError::NothingToExport)));
    }
}
