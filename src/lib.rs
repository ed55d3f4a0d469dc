//! claw-settings library
//!
//! Reads and writes the two JSON files the Claw Control Cinnamon applet
//! (`oc-applet@farmfield.se`) builds its popup menu from:
//!
//! - `models.json` - the model submenu: catalog models, manual models and
//!   local-server models, each with the command the applet runs on click
//! - `menu.json` - visibility and labels of the built-in items, up to three
//!   custom items, and the Ollama local-server settings
//!
//! ## Main Components
//!
//! - [`config`] - data directory resolution and JSON file I/O
//! - [`models`] - model catalog, id normalization, models.json records
//! - [`menu`] - menu.json items and local-server settings
//! - [`settings`] - editor state, load/save reconciliation, the store
//! - [`cli`] - subcommand handlers, interactive editor, menu preview
//!
//! ## Quick Start
//!
//! ```ignore
//! use claw_settings::{AppletDirs, SettingsStore};
//!
//! let mut store = SettingsStore::open(AppletDirs::new());
//! let mut form = store.form();
//! form.set_checked("anthropic/claude-opus-4.6", true)?;
//! store.save(&form)?;
//! ```

pub mod cli;
pub mod config;
pub mod menu;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use config::{AppletDirs, FileState, JsonFileError};
pub use menu::{CustomMenuItem, LocalModel, LocalServerConfig, MenuDocument, MenuItem};
pub use models::{CatalogEntry, ModelRecord, ModelsDocument};
pub use settings::{ManualModel, SettingsError, SettingsForm, SettingsStore};
