//! XDG Base Directory support for the applet data directory.

use std::path::{Path, PathBuf};

/// Cinnamon applet UUID; the applet reads its JSON files from a directory
/// named after it.
pub const APPLET_UUID: &str = "oc-applet@farmfield.se";

/// Environment variable that overrides the data directory outright.
pub const DIR_ENV_VAR: &str = "CLAW_SETTINGS_DIR";

pub const MODELS_FILE: &str = "models.json";
pub const MENU_FILE: &str = "menu.json";

/// Paths shared with the panel applet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppletDirs {
    /// Data directory (~/.local/share/cinnamon/applets/<uuid> or
    /// XDG_DATA_HOME/cinnamon/applets/<uuid>)
    pub data: PathBuf,
}

impl AppletDirs {
    /// Resolve the data directory, respecting environment variables.
    ///
    /// `CLAW_SETTINGS_DIR` wins over `XDG_DATA_HOME`.
    pub fn new() -> Self {
        if let Ok(dir) = std::env::var(DIR_ENV_VAR) {
            if !dir.trim().is_empty() {
                return Self::at(expand_path(&dir));
            }
        }

        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_home = std::env::var("XDG_DATA_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local/share"));

        Self {
            data: data_home.join("cinnamon").join("applets").join(APPLET_UUID),
        }
    }

    /// Use an explicit data directory.
    pub fn at(data: impl Into<PathBuf>) -> Self {
        Self { data: data.into() }
    }

    /// Resolve from an optional CLI override, falling back to the environment.
    pub fn from_override(dir: Option<&str>) -> Self {
        match dir {
            Some(dir) => Self::at(expand_path(dir)),
            None => Self::new(),
        }
    }

    pub fn models_path(&self) -> PathBuf {
        self.data.join(MODELS_FILE)
    }

    pub fn menu_path(&self) -> PathBuf {
        self.data.join(MENU_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data
    }
}

impl Default for AppletDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `~` and `$VAR` in a user-supplied path. Unknown variables leave
/// the input untouched.
fn expand_path(input: &str) -> PathBuf {
    shellexpand::full(input)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| PathBuf::from(shellexpand::tilde(input).into_owned()))
}
