use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub run: RunSettings,
    #[serde(default)]
    pub files: FileSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridSettings {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub density: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunSettings {
    pub time_step: Option<f32>,      // Seconds between generations
    pub draw_char: Option<char>,
    pub color_scheme: Option<u8>,    // 0-9, same numbering as the !-) keys
}

#[derive(Debug, Default, Deserialize)]
pub struct FileSettings {
    pub save_file: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse TOML, falling back to defaults on any error
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }

    pub fn config_path() -> PathBuf {
        Self::app_dir(dirs::config_dir())
    }

    /// Default log location, next to other per-user data
    pub fn default_log_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifeterm")
            .join("lifeterm.log")
    }

    fn app_dir(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(|| PathBuf::from("."))
            .join("lifeterm")
            .join("config.toml")
    }
}
