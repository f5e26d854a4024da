//! Interactive terminal session and headless print mode

use crate::colors::ColorState;
use crate::config::{GridConfig, PrintConfig, RunConfig};
use crate::help;
use crate::render;
use crate::terminal::{Input, Terminal};
use anyhow::Context;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use lifeterm::engine::{patterns, Controller, Grid};
use lifeterm::export::{self, DEFAULT_CELL_SIZE, DEFAULT_FRAME_DELAY_MS, MAX_GIF_FRAMES};
use lifeterm::persist;
use std::collections::VecDeque;
use std::time::Instant;

/// What a key asks the session to do
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    Forward,
    Backward,
    Reset,
    Clear,
    PatternMenu,
    Save,
    Load,
    ExportPng,
    ExportGif,
    ExportHtml,
    Record,
    Analytics,
    Help,
    Speed(f32),
    None,
}

/// Map a key to an action (color keys are handled separately).
/// Letters are case-insensitive.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Action {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Right => Action::Forward,
        KeyCode::Left => Action::Backward,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char('p') => Action::PatternMenu,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('l') => Action::Load,
        KeyCode::Char('e') => Action::ExportPng,
        KeyCode::Char('g') => Action::ExportGif,
        KeyCode::Char('w') => Action::ExportHtml,
        KeyCode::Char('v') => Action::Record,
        KeyCode::Char('a') => Action::Analytics,
        KeyCode::Char('?') => Action::Help,
        // Number keys: seconds per generation (1=fastest, 9=slowest, 0=very slow)
        KeyCode::Char(c) if c.is_ascii_digit() => Action::Speed(match c {
            '1' => 0.02,
            '2' => 0.05,
            '3' => 0.1,
            '4' => 0.2,
            '5' => 0.3,
            '6' => 0.5,
            '7' => 0.75,
            '8' => 1.0,
            '9' => 1.5,
            _ => 2.0,
        }),
        _ => Action::None,
    }
}

/// Frames captured between two presses of the record key
#[derive(Default)]
struct Recording {
    frames: VecDeque<Grid>,
}

impl Recording {
    /// Keep `grid` unless it repeats the last frame; only the newest
    /// [`MAX_GIF_FRAMES`] are kept.
    fn capture(&mut self, grid: &Grid) {
        if self.frames.back() == Some(grid) {
            return;
        }
        if self.frames.len() == MAX_GIF_FRAMES {
            self.frames.pop_front();
        }
        self.frames.push_back(grid.clone());
    }
}

/// Driver state that is not simulation state
struct Session {
    config: RunConfig,
    controller: Controller,
    colors: ColorState,
    speed: f32,
    message: Option<(String, Color)>,
    last_tick: Instant,
    recording: Option<Recording>,
    /// Cell last painted by the current drag
    painted: Option<(usize, usize)>,
}

impl Session {
    fn new(config: RunConfig, controller: Controller) -> Self {
        Self {
            colors: ColorState::new(config.color_scheme),
            speed: config.time_step,
            message: None,
            last_tick: Instant::now(),
            recording: None,
            painted: None,
            controller,
            config,
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.message = Some((text.into(), Color::Green));
    }

    fn warn(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{}", text);
        self.message = Some((text, Color::Red));
    }

    fn draw(&self, term: &mut Terminal) -> std::io::Result<()> {
        let grid = self.controller.grid();
        term.clear();
        render::draw_grid(term, grid, &self.colors, self.config.draw_char);

        let mut y = grid.rows() as i32 + 1;
        let status = self.controller.stats().classify();
        for (i, line) in render::status_lines(&self.controller).iter().enumerate() {
            let color = if i == 1 { self.colors.status(status) } else { Color::White };
            term.set_str(0, y, line, Some(color), i == 0);
            y += 1;
        }
        if let Some((text, color)) = &self.message {
            term.set_str(0, y, text, Some(*color), false);
            y += 1;
        }
        if self.recording.is_some() {
            term.set_str(0, y, "● REC", Some(Color::Red), true);
            y += 1;
        }
        term.set_str(0, y, "[Space] Play/Pause  [←/→] Time travel  [?] Help  [q] Quit", Some(Color::DarkGrey), false);
        term.render()
    }

    /// Apply an action. Returns true when the session should end.
    fn apply(&mut self, term: &mut Terminal, action: Action) -> anyhow::Result<bool> {
        match action {
            Action::Quit => return Ok(true),
            Action::TogglePause => {
                self.controller.toggle_pause();
            }
            Action::Forward => {
                self.controller.advance();
            }
            Action::Backward => {
                self.controller.retreat();
            }
            Action::Reset => {
                let grid = &self.config.grid;
                self.controller.reset(grid.rows, grid.cols, grid.density)?;
                self.info("New random grid");
            }
            Action::Clear => {
                self.controller.clear();
                self.info("Grid cleared");
            }
            Action::PatternMenu => {
                let items: Vec<String> = patterns::all()
                    .iter()
                    .map(|p| format!("{:<22} {}", p.title(), p.kind.label()))
                    .collect();
                if let Some(i) = help::choose(term, "PLACE PATTERN", &items)? {
                    let pattern = patterns::all()[i];
                    if self.controller.load_pattern(pattern.name).is_some() {
                        self.info(format!("{} placed! {}", pattern.title(), pattern.description));
                    }
                }
            }
            Action::Save => {
                let path = self.config.save_file.clone();
                match persist::save_state(&path, &self.controller.to_state()) {
                    Ok(()) => self.info(format!("Game saved to {}", path.display())),
                    Err(e) => self.warn(format!("Error saving game: {e}")),
                }
            }
            Action::Load => {
                let path = self.config.save_file.clone();
                let loaded = persist::load_state(&path).and_then(|state| {
                    self.controller.load_state(state)?;
                    Ok(())
                });
                match loaded {
                    Ok(()) => self.info(format!("Game loaded from {}", path.display())),
                    Err(e) => self.warn(format!("Could not load {}: {e}", path.display())),
                }
            }
            Action::ExportPng => {
                let path = self
                    .config
                    .export_dir
                    .join(format!("generation_{}.png", self.controller.generation()));
                match export::export_png(&path, self.controller.grid(), DEFAULT_CELL_SIZE) {
                    Ok(()) => self.info(format!("Image exported to {}", path.display())),
                    Err(e) => self.warn(format!("Error exporting image: {e}")),
                }
            }
            Action::ExportGif => {
                let frames = self.controller.history().recent(MAX_GIF_FRAMES);
                if frames.len() < 2 {
                    self.warn("Need more history for GIF export!");
                } else {
                    let path = self
                        .config
                        .export_dir
                        .join(format!("simulation_{}.gif", self.controller.generation()));
                    match export::export_gif(&path, frames, DEFAULT_CELL_SIZE, DEFAULT_FRAME_DELAY_MS) {
                        Ok(n) => self.info(format!("Animation saved to {} ({n} frames)", path.display())),
                        Err(e) => self.warn(format!("Error exporting GIF: {e}")),
                    }
                }
            }
            Action::ExportHtml => {
                let path = self
                    .config
                    .export_dir
                    .join(format!("generation_{}.html", self.controller.generation()));
                match export::export_html(&path, self.controller.grid()) {
                    Ok(()) => self.info(format!("Interactive HTML exported to {}", path.display())),
                    Err(e) => self.warn(format!("Error exporting HTML: {e}")),
                }
            }
            Action::Record => self.toggle_recording(),
            Action::Analytics => {
                let text = render::analytics_text(&self.controller.stats().summary(), &self.controller.detected_patterns());
                return Ok(help::show_modal(term, &text)?);
            }
            Action::Help => return Ok(help::show_modal(term, help::LIFE_HELP)?),
            Action::Speed(speed) => self.speed = speed,
            Action::None => {}
        }
        Ok(false)
    }

    fn toggle_recording(&mut self) {
        match self.recording.take() {
            None => {
                let mut recording = Recording::default();
                recording.capture(self.controller.grid());
                self.recording = Some(recording);
                self.info("Recording started, press v again to save");
            }
            Some(mut recording) => {
                if recording.frames.len() < 2 {
                    self.warn("No frames recorded!");
                    return;
                }
                let path = self
                    .config
                    .export_dir
                    .join(format!("recording_{}.gif", self.controller.generation()));
                let frames = recording.frames.make_contiguous();
                match export::export_gif(&path, frames, DEFAULT_CELL_SIZE, DEFAULT_FRAME_DELAY_MS) {
                    Ok(n) => self.info(format!("Recording saved to {} ({n} frames)", path.display())),
                    Err(e) => self.warn(format!("Error exporting recording: {e}")),
                }
            }
        }
    }

    /// Called after anything that may have changed the grid
    fn capture(&mut self) {
        if let Some(recording) = &mut self.recording {
            recording.capture(self.controller.grid());
        }
    }

    /// Toggle the cell under the pointer. A drag toggles each cell it
    /// enters once, not on every motion event inside it.
    fn paint(&mut self, x: u16, y: u16, dragging: bool) {
        let Some(cell) = render::cell_at(self.controller.grid(), x, y) else {
            return;
        };
        if dragging && self.painted == Some(cell) {
            return;
        }
        self.painted = Some(cell);
        if let Err(e) = self.controller.toggle(cell.0, cell.1) {
            self.warn(e.to_string());
        }
    }
}

fn controller_for(grid: &GridConfig) -> anyhow::Result<(Controller, Option<String>)> {
    let mut controller = Controller::random(grid.rows, grid.cols, grid.density, grid.seed)?;
    let mut note = None;
    if let Some(name) = &grid.pattern {
        // patterns go onto a blank field when asked for explicitly
        controller.clear();
        if controller.load_pattern(name).is_none() {
            note = Some(format!("Unknown pattern: {name}"));
        }
    }
    Ok((controller, note))
}

/// Run the interactive session until the user quits.
pub fn run(config: RunConfig) -> anyhow::Result<()> {
    let (controller, note) = controller_for(&config.grid)?;
    tracing::info!(rows = config.grid.rows, cols = config.grid.cols, "starting interactive session");

    let mut session = Session::new(config, controller);
    if let Some(note) = note {
        session.warn(note);
    }

    let mut term = Terminal::new().context("terminal setup failed")?;
    term.clear_screen()?;
    session.draw(&mut term)?;

    loop {
        let mut dirty = false;

        if let Some(input) = term.poll_input(10)? {
            dirty = true;
            match input {
                Input::Key(code, mods) => {
                    if !session.colors.handle_key(code) {
                        let action = action_for(code, mods);
                        if session.apply(&mut term, action)? {
                            break;
                        }
                    }
                }
                Input::Click { x, y } => session.paint(x, y, false),
                Input::Drag { x, y } => session.paint(x, y, true),
                Input::Resize(w, h) => {
                    term.resize(w, h);
                    term.clear_screen()?;
                }
            }
        }

        if session.last_tick.elapsed().as_secs_f32() >= session.speed {
            session.last_tick = Instant::now();
            dirty |= session.controller.tick().is_some();
        }

        if dirty {
            session.capture();
            session.draw(&mut term)?;
        }
    }

    tracing::info!(generation = session.controller.generation(), "session ended");
    Ok(())
}

/// Advance without a UI and print the final grid plus statistics.
pub fn print(config: PrintConfig) -> anyhow::Result<()> {
    let mut controller = match &config.load {
        Some(path) => {
            let state = persist::load_state(path).with_context(|| format!("loading {}", path.display()))?;
            let generation = state.generation;
            Controller::from_grid(state.into_grid()?, generation)
        }
        None => {
            let (controller, note) = controller_for(&config.grid)?;
            if let Some(note) = note {
                eprintln!("{note}");
            }
            controller
        }
    };

    for _ in 0..config.generations {
        controller.advance();
    }

    print!("{}", render::grid_to_text(controller.grid(), config.draw_char, '.'));
    println!();
    for line in render::status_lines(&controller) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_travel_in_time() {
        assert_eq!(action_for(KeyCode::Right, KeyModifiers::NONE), Action::Forward);
        assert_eq!(action_for(KeyCode::Left, KeyModifiers::NONE), Action::Backward);
    }

    #[test]
    fn ctrl_c_quits_but_c_clears() {
        assert_eq!(action_for(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(action_for(KeyCode::Char('c'), KeyModifiers::NONE), Action::Clear);
    }

    #[test]
    fn letters_ignore_case() {
        assert_eq!(action_for(KeyCode::Char('R'), KeyModifiers::SHIFT), Action::Reset);
        assert_eq!(action_for(KeyCode::Char('Q'), KeyModifiers::SHIFT), Action::Quit);
        assert_eq!(action_for(KeyCode::Char('P'), KeyModifiers::SHIFT), Action::PatternMenu);
        assert_eq!(action_for(KeyCode::Char('C'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(action_for(KeyCode::Char('W'), KeyModifiers::SHIFT), Action::ExportHtml);
        assert_eq!(action_for(KeyCode::Char('w'), KeyModifiers::NONE), Action::ExportHtml);
        assert_eq!(action_for(KeyCode::Char('v'), KeyModifiers::NONE), Action::Record);
    }

    #[test]
    fn speed_presets() {
        assert_eq!(action_for(KeyCode::Char('1'), KeyModifiers::NONE), Action::Speed(0.02));
        assert_eq!(action_for(KeyCode::Char('0'), KeyModifiers::NONE), Action::Speed(2.0));
        assert_eq!(action_for(KeyCode::Char('z'), KeyModifiers::NONE), Action::None);
    }

    #[test]
    fn explicit_pattern_starts_on_blank_grid() {
        let grid = GridConfig {
            rows: 10,
            cols: 10,
            density: 1.0,
            seed: Some(1),
            pattern: Some("blinker".into()),
        };
        let (controller, note) = controller_for(&grid).unwrap();
        assert!(note.is_none());
        assert_eq!(controller.grid().population(), 3);
        assert!(controller.is_paused());
    }

    fn session(rows: usize, cols: usize) -> Session {
        let grid = GridConfig {
            rows,
            cols,
            density: 0.0,
            seed: Some(1),
            pattern: None,
        };
        let (controller, _) = controller_for(&grid).unwrap();
        let config = RunConfig::resolve(&crate::settings::Settings::default(), grid, None, None);
        Session::new(config, controller)
    }

    #[test]
    fn drag_toggles_each_cell_once() {
        let mut s = session(4, 4);
        s.paint(0, 0, false);
        // second motion event inside the same cell (x 0..2 is column 0)
        s.paint(1, 0, true);
        assert_eq!(s.controller.grid().get(0, 0), Some(true));

        s.paint(2, 0, true);
        s.paint(3, 0, true);
        s.paint(4, 0, true);
        assert_eq!(s.controller.grid().population(), 3);
        assert_eq!(s.controller.grid().get(0, 2), Some(true));

        // a fresh click on the painted cell toggles it back
        s.paint(4, 0, false);
        assert_eq!(s.controller.grid().get(0, 2), Some(false));

        // off-grid positions are ignored
        s.paint(40, 40, true);
        assert_eq!(s.controller.grid().population(), 2);
    }

    #[test]
    fn recording_skips_repeats_and_caps_frames() {
        let mut s = session(5, 5);
        s.recording = Some(Recording::default());
        s.capture();
        s.capture();
        assert_eq!(s.recording.as_ref().unwrap().frames.len(), 1);

        let mut recording = Recording::default();
        for col in 0..5 {
            for row in 0..5 {
                for _ in 0..3 {
                    // toggling the same cell three times yields distinct consecutive grids
                    s.paint(col * 2, row, false);
                    recording.capture(s.controller.grid());
                }
            }
        }
        assert_eq!(recording.frames.len(), MAX_GIF_FRAMES);
        assert_eq!(recording.frames.back(), Some(s.controller.grid()));
    }

    #[test]
    fn unknown_pattern_is_reported() {
        let grid = GridConfig {
            rows: 5,
            cols: 5,
            density: 0.0,
            seed: Some(1),
            pattern: Some("dragon".into()),
        };
        let (_, note) = controller_for(&grid).unwrap();
        assert_eq!(note.as_deref(), Some("Unknown pattern: dragon"));
    }
}
