//! Load and save reconciliation between the two documents and the form.
//!
//! Pure functions: no file I/O happens here. Loading maps
//! (`ModelsDocument`, `MenuDocument`) onto a [`SettingsForm`]; saving maps a
//! form back onto fresh documents. `save` followed by `load` reproduces the
//! form for every catalog entry.

use std::collections::{HashMap, HashSet};

use super::form::{ManualModel, SettingsForm, MAX_MANUAL_MODELS};
use crate::menu::{MenuDocument, MenuItem, MAX_CUSTOM_ITEMS, MAX_LOCAL_MODELS};
use crate::models::catalog::{self, CatalogEntry};
use crate::models::ids::{CanonicalKey, MANUAL_PREFIX};
use crate::models::{ModelRecord, ModelsDocument};

/// Which part of the editor a models.json record belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOwner {
    /// Refers to one or more catalog entries
    Catalog(Vec<&'static CatalogEntry>),
    /// `manual_` record
    Manual,
    /// `ollama/` record
    LocalServer,
    /// Nothing in the editor represents it
    Unrecognized,
}

fn catalog_index() -> HashMap<CanonicalKey, &'static CatalogEntry> {
    catalog::catalog()
        .iter()
        .map(|entry| (CanonicalKey::of(entry.id), entry))
        .collect()
}

fn classify_with(
    record: &ModelRecord,
    index: &HashMap<CanonicalKey, &'static CatalogEntry>,
) -> RecordOwner {
    if record.is_manual() {
        return RecordOwner::Manual;
    }
    if record.is_ollama() {
        return RecordOwner::LocalServer;
    }

    let mut entries: Vec<&'static CatalogEntry> = Vec::new();
    for raw in record.referenced_model_ids() {
        if let Some(&entry) = index.get(&CanonicalKey::of(raw)) {
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
    }

    if entries.is_empty() {
        RecordOwner::Unrecognized
    } else {
        RecordOwner::Catalog(entries)
    }
}

/// Decide which section owns a record.
pub fn classify(record: &ModelRecord) -> RecordOwner {
    classify_with(record, &catalog_index())
}

/// Ids of catalog entries that the records mark as active.
pub fn active_catalog_ids(models: &ModelsDocument) -> HashSet<&'static str> {
    let index = catalog_index();
    models
        .iter()
        .filter_map(|record| match classify_with(record, &index) {
            RecordOwner::Catalog(entries) => Some(entries),
            _ => None,
        })
        .flatten()
        .map(|entry| entry.id)
        .collect()
}

/// Records no section of the editor owns, in file order.
pub fn unrecognized_records(models: &ModelsDocument) -> Vec<ModelRecord> {
    let index = catalog_index();
    models
        .iter()
        .filter(|record| classify_with(record, &index) == RecordOwner::Unrecognized)
        .cloned()
        .collect()
}

/// Build the editor state from the two documents.
pub fn load_form(models: &ModelsDocument, menu: &MenuDocument) -> SettingsForm {
    let mut form = SettingsForm::new();

    // Catalog checkboxes
    let active = active_catalog_ids(models);
    for entry in catalog::catalog() {
        if active.contains(entry.id) {
            form.check_entry(entry, true);
        }
    }

    // Manual models, first ten in file order
    let manual: Vec<&ModelRecord> = models.iter().filter(|r| r.is_manual()).collect();
    if manual.len() > MAX_MANUAL_MODELS {
        tracing::warn!(
            found = manual.len(),
            max = MAX_MANUAL_MODELS,
            "Ignoring manual models past the last slot"
        );
    }
    for (slot, record) in manual.into_iter().take(MAX_MANUAL_MODELS).enumerate() {
        let model_id = record.id.strip_prefix(MANUAL_PREFIX).unwrap_or(&record.id);
        form.manual[slot] = ManualModel::new(record.name.clone(), model_id);
    }

    // Local server
    if let Some(server) = menu.local_server() {
        form.local.enabled = server.enabled;
        form.local.custom_address = server.custom_address;
        form.local.ip = server.ip;
        form.local.port = server.port;
        if server.models.len() > MAX_LOCAL_MODELS {
            tracing::warn!(
                found = server.models.len(),
                max = MAX_LOCAL_MODELS,
                "Ignoring local models past the last slot"
            );
        }
        for (slot, model) in server.models.into_iter().take(MAX_LOCAL_MODELS).enumerate() {
            form.local.models[slot] = model;
        }
    }

    // Menu toggles and custom items
    for item in MenuItem::TOGGLEABLE {
        form.set_menu_enabled(item, menu.item_enabled(item));
    }
    for slot in 1..=MAX_CUSTOM_ITEMS {
        if let Some(item) = menu.custom_item(slot) {
            form.custom[slot - 1] = item;
        }
    }

    form.unrecognized = unrecognized_records(models);
    form
}

/// Build models.json from the form.
///
/// Order: checked catalog entries, preserved unrecognized records, manual
/// models, local-server models.
pub fn build_models_document(form: &SettingsForm) -> ModelsDocument {
    let mut records: Vec<ModelRecord> = form
        .checked_entries()
        .into_iter()
        .map(|entry| ModelRecord::new(entry.id, entry.label(), entry.id))
        .collect();

    records.extend(form.unrecognized.iter().cloned());
    records.extend(form.manual_records());
    records.extend(form.local_records());

    ModelsDocument::new(records)
}

/// Build menu.json from the form on top of the previously loaded document.
///
/// Keys the editor does not own are kept; built-in items missing from the
/// file are seeded with the applet's defaults so saving never hides them.
pub fn build_menu_document(form: &SettingsForm, base: &MenuDocument) -> MenuDocument {
    let mut menu = base.clone();
    menu.seed_missing_items();

    for item in MenuItem::TOGGLEABLE {
        menu.set_item_enabled(item, form.menu_enabled(item));
    }

    for (index, item) in form.custom.iter().enumerate() {
        menu.set_custom_item(index + 1, item);
    }

    menu.set_local_server(&form.local.to_config());

    menu
}
