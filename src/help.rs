use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::io;

/// Key reference shown by `?`
pub const LIFE_HELP: &str = "\
GAME OF LIFE
─────────────────────────
 Space   Pause/resume
 →       Step forward (redo)
 ←       Step back (undo)
 Click   Toggle cell
 r       Random reset
 c       Clear grid
 p       Place a pattern
 s / l   Save / load
 e / g   Export PNG / GIF
 w       Export web page
 v       Start/stop GIF recording
 Drag    Paint cells
 a       Analytics
 1-9     Speed (1=fast)
 !-()    Color scheme
 q/Esc   Quit
 ?       Close help
─────────────────────────";

/// Draw a centered box with the provided text into the back buffer.
pub fn render_overlay(term: &mut Terminal, text: &str) {
    if text.is_empty() {
        return;
    }
    let (width, height) = term.size();

    let lines: Vec<&str> = text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    let (left, right) = (start_x as i32, (start_x + box_width - 1) as i32);

    let border = Some(Color::White);
    let body = Some(Color::Grey);

    let top = start_y as i32;
    let bottom = (start_y + box_height - 1) as i32;
    term.set(left, top, '┌', border, false);
    term.set(right, top, '┐', border, false);
    term.set(left, bottom, '└', border, false);
    term.set(right, bottom, '┘', border, false);
    for x in left + 1..right {
        term.set(x, top, '─', border, false);
        term.set(x, bottom, '─', border, false);
    }

    for (i, line) in lines.iter().enumerate() {
        let y = top + 1 + i as i32;
        let padding = max_width.saturating_sub(line.chars().count());
        term.set(left, y, '│', border, false);
        term.set_str(left + 1, y, &format!(" {}{} ", line, " ".repeat(padding)), body, false);
        term.set(right, y, '│', border, false);
    }
}

/// Show `text` over the current frame until `?`/Enter/any close key.
/// Returns true if the user asked to quit while it was open.
pub fn show_modal(term: &mut Terminal, text: &str) -> io::Result<bool> {
    render_overlay(term, text);
    term.render()?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Char('?') | KeyCode::Char('a') | KeyCode::Enter | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

/// Numbered menu; returns the chosen index, or None when cancelled.
pub fn choose(term: &mut Terminal, title: &str, items: &[String]) -> io::Result<Option<usize>> {
    let mut text = format!("{title}\n─────────────────────────\n");
    for (i, item) in items.iter().enumerate() {
        text.push_str(&format!(" {}  {}\n", menu_key(i), item));
    }
    text.push_str("─────────────────────────\n Esc  Cancel");
    render_overlay(term, &text);
    term.render()?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                KeyCode::Char(c) => {
                    if let Some(i) = menu_index(c).filter(|&i| i < items.len()) {
                        return Ok(Some(i));
                    }
                }
                _ => {}
            }
        }
    }
}

/// Menu entries are keyed a, b, c, ...
fn menu_key(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

fn menu_index(key: char) -> Option<usize> {
    key.is_ascii_lowercase().then(|| (key as u8 - b'a') as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_mentions_time_travel() {
        assert!(LIFE_HELP.starts_with("GAME OF LIFE"));
        assert!(LIFE_HELP.contains("Step back"));
        assert!(LIFE_HELP.contains(" w       Export web page"));
    }

    #[test]
    fn menu_keys_round_trip() {
        assert_eq!(menu_key(0), 'a');
        assert_eq!(menu_key(12), 'm');
        assert_eq!(menu_index('m'), Some(12));
        assert_eq!(menu_index('Q'), None);
    }
}
