//! Save/load and image export against a real filesystem

use lifeterm::engine::patterns::{lookup, place};
use lifeterm::export::{export_gif, export_html, export_png, DEFAULT_CELL_SIZE};
use lifeterm::persist::{load_state, save_state, GridState};
use lifeterm::{Controller, Grid, LifeError};
use std::fs;
use tempfile::tempdir;

#[test]
fn save_then_load_restores_grid_and_generation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game_save.json");

    let mut original = Controller::random(12, 17, 0.4, Some(99)).unwrap();
    for _ in 0..6 {
        original.advance();
    }
    save_state(&path, &original.to_state()).unwrap();

    let mut restored = Controller::random(3, 3, 0.0, Some(1)).unwrap();
    restored.load_state(load_state(&path).unwrap()).unwrap();

    assert_eq!(restored.grid(), original.grid());
    assert_eq!(restored.generation(), 6);
    assert_eq!(restored.history().len(), 1);
    assert_eq!(restored.stats().current_population(), original.grid().population());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_state(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, LifeError::Io(_)), "{err:?}");
}

#[test]
fn garbage_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_state(&path), Err(LifeError::Json(_))));

    fs::write(&path, r#"{"grid": [[0, 1]], "generation": 0, "rows": 2, "cols": 2}"#).unwrap();
    assert!(matches!(load_state(&path), Err(LifeError::Malformed(_))));

    fs::write(&path, r#"{"grid": [], "generation": 0, "rows": 0, "cols": 0}"#).unwrap();
    assert!(matches!(load_state(&path), Err(LifeError::InvalidDimension { .. })));
}

#[test]
fn failed_load_leaves_the_game_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"grid": [[2]], "generation": 5, "rows": 1, "cols": 1}"#).unwrap();

    let mut c = Controller::random(4, 4, 0.5, Some(3)).unwrap();
    c.advance();
    c.advance();
    c.retreat();
    let before = c.grid().clone();

    // same route the interactive load takes
    let loaded = load_state(&path).and_then(|state| c.load_state(state).map(|_| ()));
    assert!(matches!(loaded, Err(LifeError::Malformed(_))));
    assert_eq!(c.grid(), &before);
    assert_eq!(c.generation(), 1);
    assert_eq!(c.history().len(), 3);

    // parses and passes through the controller, which rejects the shape
    let short = GridState {
        grid: vec![vec![1, 1]],
        generation: 9,
        rows: 2,
        cols: 2,
    };
    assert!(matches!(c.load_state(short), Err(LifeError::Malformed(_))));
    assert_eq!(c.grid(), &before);
    assert_eq!(c.generation(), 1);
    assert_eq!(c.history().len(), 3);
    assert_eq!(c.history().position(), 1);
}

#[test]
fn html_page_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generation_0.html");
    let grid = place(&Grid::new(4, 5).unwrap(), lookup("blinker").unwrap(), 0, 0);

    export_html(&path, &grid).unwrap();
    let page = fs::read_to_string(&path).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("const initial = [[0,1,0,0,0],[0,1,0,0,0],[0,1,0,0,0],[0,0,0,0,0]];"));
    assert!(page.contains("const rows = 4, cols = 5"));
}

#[test]
fn hand_written_save_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hand.json");
    fs::write(
        &path,
        r#"{"grid": [[0, 0, 0], [1, 1, 1], [0, 0, 0]], "generation": 41, "rows": 3, "cols": 3}"#,
    )
    .unwrap();

    let state: GridState = load_state(&path).unwrap();
    let mut c = Controller::from_grid(state.into_grid().unwrap(), 41);
    c.advance();
    assert_eq!(c.generation(), 42);
}

#[test]
fn png_and_gif_land_on_disk() {
    let dir = tempdir().unwrap();
    let grid = place(&Grid::new(6, 8).unwrap(), lookup("glider").unwrap(), 0, 0);

    let png = dir.path().join("generation_0.png");
    export_png(&png, &grid, DEFAULT_CELL_SIZE).unwrap();
    let img = image::open(&png).unwrap();
    assert_eq!((img.width(), img.height()), (80, 60));

    let mut c = Controller::from_grid(grid, 0);
    for _ in 0..4 {
        c.advance();
    }
    let gif = dir.path().join("simulation_4.gif");
    let frames = export_gif(&gif, c.history().recent(50), 4, 100).unwrap();
    assert_eq!(frames, 5);
    assert!(fs::metadata(&gif).unwrap().len() > 0);
}

#[test]
fn empty_gif_is_refused() {
    let dir = tempdir().unwrap();
    let err = export_gif(&dir.path().join("x.gif"), &[], 4, 100).unwrap_err();
    assert!(matches!(err, LifeError::NothingToExport));
}
