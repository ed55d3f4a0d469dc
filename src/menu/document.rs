//! Typed view over menu.json.
//!
//! The file is a flat JSON object shared with the applet. Only the keys this
//! crate owns are rewritten; everything else is carried through untouched.
//! Entries are read one field at a time, so a stray value never hides the
//! rest of its entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::items::{CustomMenuItem, MenuItem, MenuItemEntry};
use super::local_server::LocalServerConfig;
use crate::config::FileState;

pub const LOCAL_SERVER_KEY: &str = "ollama";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuDocument {
    entries: Map<String, Value>,
}

/// JavaScript truthiness, which the applet applies to each entry.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl MenuDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Edit the object stored under `key`; a missing or non-object value
    /// starts out as an empty object.
    fn update_object(&mut self, key: &str, f: impl FnOnce(&mut Map<String, Value>)) {
        let mut object = match self.entries.remove(key) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        f(&mut object);
        self.entries.insert(key.to_string(), Value::Object(object));
    }

    // =========================================================================
    // Built-in items
    // =========================================================================

    pub fn item(&self, item: MenuItem) -> Option<MenuItemEntry> {
        self.raw(item.key()).and_then(MenuItemEntry::from_value)
    }

    /// Visibility as the applet computes it.
    ///
    /// Unless menu.json parsed, the applet falls back to showing everything.
    /// Otherwise an item is shown when its key holds a truthy value whose
    /// `enabled` is not `false`.
    pub fn applet_shows(&self, item: MenuItem, state: &FileState) -> bool {
        if !state.is_loaded() {
            return true;
        }
        match self.raw(item.key()) {
            Some(value) if truthy(value) => value.get("enabled") != Some(&Value::Bool(false)),
            _ => false,
        }
    }

    /// Visibility as the settings editor presents it: enabled unless disabled.
    pub fn item_enabled(&self, item: MenuItem) -> bool {
        self.item(item).map(|e| e.enabled).unwrap_or(true)
    }

    /// Label the applet will draw for `item`.
    pub fn item_label(&self, item: MenuItem) -> String {
        self.item(item)
            .unwrap_or_else(|| MenuItemEntry::default_for(item))
            .display_label(item)
    }

    /// Set `enabled`, adding the default label when the entry has none.
    pub fn set_item_enabled(&mut self, item: MenuItem, enabled: bool) {
        let field = if item.uses_text_field() { "text" } else { "label" };
        self.update_object(item.key(), |entry| {
            entry.insert("enabled".to_string(), Value::Bool(enabled));
            if !entry.contains_key(field) {
                entry.insert(
                    field.to_string(),
                    Value::String(item.default_label().to_string()),
                );
            }
        });
    }

    /// Add the applet's default entry for every built-in item that has none.
    pub fn seed_missing_items(&mut self) {
        for item in MenuItem::ALL {
            if !self.entries.contains_key(item.key()) {
                if let Ok(value) = serde_json::to_value(MenuItemEntry::default_for(item)) {
                    self.entries.insert(item.key().to_string(), value);
                }
            }
        }
    }

    // =========================================================================
    // Custom items
    // =========================================================================

    /// Custom item in the 1-based `slot`.
    pub fn custom_item(&self, slot: usize) -> Option<CustomMenuItem> {
        self.raw(&CustomMenuItem::key(slot))
            .and_then(CustomMenuItem::from_value)
    }

    /// Write a custom item, or remove the slot when `item` is blank.
    pub fn set_custom_item(&mut self, slot: usize, item: &CustomMenuItem) {
        let key = CustomMenuItem::key(slot);
        if item.is_blank() {
            self.entries.remove(&key);
            return;
        }
        let stored = CustomMenuItem {
            title: item.title.trim().to_string(),
            command: item.command.trim().to_string(),
            enabled: item.enabled,
        };
        if let Ok(value) = serde_json::to_value(stored) {
            self.entries.insert(key, value);
        }
    }

    // =========================================================================
    // Local server
    // =========================================================================

    pub fn local_server(&self) -> Option<LocalServerConfig> {
        let value = self.raw(LOCAL_SERVER_KEY)?;
        let config = LocalServerConfig::from_value(value);
        if config.is_none() {
            tracing::warn!(key = LOCAL_SERVER_KEY, "Ignoring non-object menu.json entry");
        }
        config
    }

    pub fn set_local_server(&mut self, config: &LocalServerConfig) {
        if let Ok(value) = serde_json::to_value(config) {
            self.entries.insert(LOCAL_SERVER_KEY.to_string(), value);
        }
    }
}
