//! In-memory state of the settings editor.
//!
//! One explicit structure replaces the per-widget dictionaries of a dialog:
//! catalog checkboxes, manual model slots, the local server section, menu
//! toggles and custom menu items. Every front end (CLI subcommands, the
//! interactive editor, tests) edits this and hands it to the store.

use std::collections::{BTreeMap, HashMap};

use super::error::SettingsError;
use crate::menu::{
    parse_port, CustomMenuItem, LocalModel, LocalServerConfig, MenuItem, DEFAULT_IP,
    DEFAULT_PORT, MAX_CUSTOM_ITEMS, MAX_LOCAL_MODELS,
};
use crate::models::catalog::{self, CatalogEntry};
use crate::models::ids::{ensure_ollama_prefix, MANUAL_PREFIX};
use crate::models::ModelRecord;

/// Maximum number of manual model slots.
pub const MAX_MANUAL_MODELS: usize = 10;

/// A user-defined model outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManualModel {
    pub title: String,
    /// `provider/model` as typed by the user
    pub model_id: String,
}

impl ManualModel {
    pub fn new(title: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            model_id: model_id.into(),
        }
    }

    /// Only slots with both a title and a model id are saved.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.model_id.trim().is_empty()
    }

    pub fn to_record(&self) -> ModelRecord {
        let model_id = self.model_id.trim();
        ModelRecord::new(
            format!("{}{}", MANUAL_PREFIX, model_id),
            self.title.trim(),
            model_id,
        )
    }
}

/// Local server section of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalServerForm {
    pub enabled: bool,
    pub custom_address: bool,
    pub ip: String,
    pub port: u16,
    pub models: [LocalModel; MAX_LOCAL_MODELS],
}

impl Default for LocalServerForm {
    fn default() -> Self {
        Self {
            enabled: false,
            custom_address: false,
            ip: DEFAULT_IP.to_string(),
            port: DEFAULT_PORT,
            models: Default::default(),
        }
    }
}

impl LocalServerForm {
    /// Set the port from user input; empty input restores the default.
    pub fn set_port_str(&mut self, input: &str) -> Result<(), SettingsError> {
        self.port = parse_port(input).ok_or_else(|| SettingsError::InvalidPort(input.to_string()))?;
        Ok(())
    }

    /// IP to store; blank input falls back to localhost.
    pub fn effective_ip(&self) -> String {
        let ip = self.ip.trim();
        if ip.is_empty() {
            DEFAULT_IP.to_string()
        } else {
            ip.to_string()
        }
    }

    /// The `ollama` section as it will be written.
    pub fn to_config(&self) -> LocalServerConfig {
        LocalServerConfig {
            enabled: self.enabled,
            custom_address: self.custom_address,
            ip: self.effective_ip(),
            port: self.port,
            models: self.complete_models(),
        }
    }

    /// Slots with both a name and an id, ids prefixed with `ollama/`.
    pub fn complete_models(&self) -> Vec<LocalModel> {
        self.models
            .iter()
            .filter(|m| !m.name.trim().is_empty() && !m.id.trim().is_empty())
            .map(|m| LocalModel::new(m.name.trim(), ensure_ollama_prefix(m.id.trim())))
            .collect()
    }
}

/// Full editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    catalog: BTreeMap<&'static str, bool>,
    pub manual: [ManualModel; MAX_MANUAL_MODELS],
    pub local: LocalServerForm,
    menu: HashMap<MenuItem, bool>,
    pub custom: [CustomMenuItem; MAX_CUSTOM_ITEMS],
    /// Records from models.json that no section owns; written back unchanged
    pub unrecognized: Vec<ModelRecord>,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsForm {
    /// Everything unchecked, menu items visible, slots empty.
    pub fn new() -> Self {
        Self {
            catalog: catalog::catalog().iter().map(|e| (e.id, false)).collect(),
            manual: Default::default(),
            local: LocalServerForm::default(),
            menu: MenuItem::TOGGLEABLE.iter().map(|item| (*item, true)).collect(),
            custom: Default::default(),
            unrecognized: Vec::new(),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn is_checked(&self, id: &str) -> bool {
        self.catalog.get(id).copied().unwrap_or(false)
    }

    /// Check or uncheck a catalog entry by its exact id.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> Result<(), SettingsError> {
        let entry = catalog::find(id).ok_or_else(|| SettingsError::UnknownModel(id.to_string()))?;
        self.check_entry(entry, checked);
        Ok(())
    }

    pub(crate) fn check_entry(&mut self, entry: &'static CatalogEntry, checked: bool) {
        self.catalog.insert(entry.id, checked);
    }

    /// Checked entries in catalog order.
    pub fn checked_entries(&self) -> Vec<&'static CatalogEntry> {
        catalog::catalog()
            .iter()
            .filter(|e| self.is_checked(e.id))
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.catalog.values().filter(|checked| **checked).count()
    }

    // =========================================================================
    // Manual models
    // =========================================================================

    /// Set the 1-based manual slot.
    pub fn set_manual(&mut self, slot: usize, model: ManualModel) -> Result<(), SettingsError> {
        let index = slot_index(slot, MAX_MANUAL_MODELS, "Manual model")?;
        self.manual[index] = model;
        Ok(())
    }

    pub fn manual_records(&self) -> Vec<ModelRecord> {
        self.manual
            .iter()
            .filter(|m| m.is_complete())
            .map(ManualModel::to_record)
            .collect()
    }

    // =========================================================================
    // Local server
    // =========================================================================

    /// Set the 1-based local model slot.
    pub fn set_local_model(&mut self, slot: usize, model: LocalModel) -> Result<(), SettingsError> {
        let index = slot_index(slot, MAX_LOCAL_MODELS, "Local model")?;
        self.local.models[index] = model;
        Ok(())
    }

    pub fn local_records(&self) -> Vec<ModelRecord> {
        self.local
            .complete_models()
            .into_iter()
            .map(|m| ModelRecord::new(m.id.clone(), m.name, m.id))
            .collect()
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn menu_enabled(&self, item: MenuItem) -> bool {
        self.menu.get(&item).copied().unwrap_or(true)
    }

    pub fn set_menu_enabled(&mut self, item: MenuItem, enabled: bool) {
        self.menu.insert(item, enabled);
    }

    /// Set the 1-based custom item slot.
    pub fn set_custom(&mut self, slot: usize, item: CustomMenuItem) -> Result<(), SettingsError> {
        let index = slot_index(slot, MAX_CUSTOM_ITEMS, "Custom menu item")?;
        self.custom[index] = item;
        Ok(())
    }
}

fn slot_index(slot: usize, max: usize, section: &'static str) -> Result<usize, SettingsError> {
    if slot == 0 || slot > max {
        return Err(SettingsError::SlotOutOfRange { section, slot, max });
    }
    Ok(slot - 1)
}
