//! Applet menu configuration (menu.json).

pub mod document;
pub mod items;
pub mod local_server;

pub use document::{MenuDocument, LOCAL_SERVER_KEY};
pub use items::{CustomMenuItem, MenuItem, MenuItemEntry, MAX_CUSTOM_ITEMS};
pub use local_server::{
    parse_port, LocalModel, LocalServerConfig, DEFAULT_IP, DEFAULT_PORT, MAX_LOCAL_MODELS,
};
