use crossterm::event::KeyCode;
use crossterm::style::Color;
use lifeterm::engine::Status;

/// Selected color scheme, switched with Shift+digit
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme.min(9) }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        self.scheme = match code {
            KeyCode::Char('!') => 1,  // fire
            KeyCode::Char('@') => 2,  // ice
            KeyCode::Char('#') => 3,  // pink
            KeyCode::Char('$') => 4,  // gold
            KeyCode::Char('%') => 5,  // electric
            KeyCode::Char('^') => 6,  // lava
            KeyCode::Char('&') => 7,  // mono
            KeyCode::Char('*') => 8,  // rainbow
            KeyCode::Char('(') => 9,  // neon
            KeyCode::Char(')') => 0,  // green
            _ => return false,
        };
        true
    }

    /// Color for a live cell; crowded cells glow brighter
    pub fn cell(&self, neighbors: u8) -> (Color, bool) {
        let intensity = match neighbors {
            0 | 1 => 0,  // about to die
            2 => 1,
            3 => 2,
            _ => 3,      // overcrowded
        };
        scheme_color(self.scheme, intensity)
    }

    /// Color for the status line, by population classification
    pub fn status(&self, status: Status) -> Color {
        if self.scheme == 7 {
            // Mono keeps traffic-light semantics
            return match status {
                Status::Extinct => Color::Red,
                Status::Stable => Color::Cyan,
                Status::NearStable => Color::Yellow,
                Status::Active => Color::Green,
            };
        }
        let intensity = match status {
            Status::Extinct => 0,
            Status::Stable => 1,
            Status::NearStable => 2,
            Status::Active => 3,
        };
        scheme_color(self.scheme, intensity).0
    }
}

/// Get color from scheme based on intensity (0-3)
fn scheme_color(scheme: u8, intensity: u8) -> (Color, bool) {
    let ramp = match scheme {
        1 => [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow],
        2 => [Color::DarkBlue, Color::Blue, Color::Cyan, Color::AnsiValue(14)],
        3 => [Color::DarkMagenta, Color::Magenta, Color::Red, Color::AnsiValue(13)],
        4 => [Color::DarkYellow, Color::Yellow, Color::White, Color::AnsiValue(11)],
        5 => [Color::DarkCyan, Color::Cyan, Color::White, Color::AnsiValue(14)],
        6 => [Color::DarkRed, Color::Red, Color::Magenta, Color::AnsiValue(9)],
        7 => [Color::DarkGrey, Color::Grey, Color::White, Color::White],
        8 => [Color::Red, Color::Yellow, Color::Green, Color::Cyan],
        9 => [Color::DarkBlue, Color::Blue, Color::Magenta, Color::AnsiValue(13)],
        _ => [Color::DarkGreen, Color::Green, Color::Green, Color::AnsiValue(10)],
    };
    let i = intensity.min(3) as usize;
    (ramp[i], i >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_digits_pick_schemes() {
        let mut colors = ColorState::new(0);
        assert!(colors.handle_key(KeyCode::Char('&')));
        assert_eq!(colors.scheme, 7);
        assert!(colors.handle_key(KeyCode::Char(')')));
        assert_eq!(colors.scheme, 0);
        assert!(!colors.handle_key(KeyCode::Char('x')));
        assert_eq!(colors.scheme, 0);
    }

    #[test]
    fn crowded_cells_are_bold() {
        let colors = ColorState::new(0);
        assert!(!colors.cell(2).1);
        assert!(colors.cell(3).1);
        assert_eq!(colors.cell(7), colors.cell(8));
    }

    #[test]
    fn mono_status_is_semantic() {
        let colors = ColorState::new(7);
        assert_eq!(colors.status(Status::Extinct), Color::Red);
        assert_eq!(colors.status(Status::Active), Color::Green);
    }
}
