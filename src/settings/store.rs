//! Loading and saving the settings files as one unit.

use super::error::SettingsError;
use super::form::SettingsForm;
use super::reconcile::{build_menu_document, build_models_document, load_form};
use crate::config::{load_or_default, write_json_atomic, AppletDirs, FileState};
use crate::menu::MenuDocument;
use crate::models::ModelsDocument;

/// models.json and menu.json as last read from or written to disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dirs: AppletDirs,
    models: ModelsDocument,
    menu: MenuDocument,
    models_state: FileState,
    menu_state: FileState,
}

impl SettingsStore {
    /// Read both files. Missing or unreadable files load as empty documents.
    pub fn open(dirs: AppletDirs) -> Self {
        let (models, models_state) = load_or_default(&dirs.models_path());
        let (menu, menu_state) = load_or_default(&dirs.menu_path());

        tracing::debug!(
            dir = %dirs.data_dir().display(),
            models = %models_state,
            menu = %menu_state,
            "Opened settings"
        );

        Self {
            dirs,
            models,
            menu,
            models_state,
            menu_state,
        }
    }

    /// Editor state for the current documents.
    pub fn form(&self) -> SettingsForm {
        load_form(&self.models, &self.menu)
    }

    /// Write the form to both files.
    ///
    /// models.json is written first. Each file is replaced atomically, so a
    /// failure leaves that file's previous content in place.
    pub fn save(&mut self, form: &SettingsForm) -> Result<(), SettingsError> {
        let models = build_models_document(form);
        let menu = build_menu_document(form, &self.menu);

        if let Err(e) = write_json_atomic(&self.dirs.models_path(), &models) {
            tracing::error!(error = %e, "Failed to save models");
            return Err(e.into());
        }
        self.models = models;
        self.models_state = FileState::Loaded;

        if let Err(e) = write_json_atomic(&self.dirs.menu_path(), &menu) {
            tracing::error!(error = %e, "Failed to save menu");
            return Err(e.into());
        }
        self.menu = menu;
        self.menu_state = FileState::Loaded;

        tracing::info!(
            models = self.models.len(),
            dir = %self.dirs.data_dir().display(),
            "Settings saved"
        );
        Ok(())
    }

    pub fn dirs(&self) -> &AppletDirs {
        &self.dirs
    }

    pub fn models(&self) -> &ModelsDocument {
        &self.models
    }

    pub fn menu(&self) -> &MenuDocument {
        &self.menu
    }

    pub fn models_state(&self) -> &FileState {
        &self.models_state
    }

    pub fn menu_state(&self) -> &FileState {
        &self.menu_state
    }
}
