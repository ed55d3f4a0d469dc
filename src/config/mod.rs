//! Configuration: data directory resolution and JSON file I/O.

mod json_file;
mod xdg;

pub use json_file::{
    load_or_default, read_json, to_pretty_json, write_json_atomic, FileState, JsonFileError,
};
pub use xdg::{AppletDirs, APPLET_UUID, DIR_ENV_VAR, MENU_FILE, MODELS_FILE};
