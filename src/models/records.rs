//! Records stored in models.json.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::command::launch_command;
use super::ids::{extract_model_flag, is_manual_id, is_ollama_id};

/// One entry of the applet's model submenu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Record key: catalog id, `manual_<id>` or `ollama/<id>`
    #[serde(default)]
    pub id: String,
    /// Label shown in the applet menu
    #[serde(default)]
    pub name: String,
    /// Shell command the applet runs when the entry is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    /// Model id passed to the CLI tool. Missing in files written by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Fields this crate does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelRecord {
    /// Build a record whose command launches `model`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            id: id.into(),
            name: name.into(),
            cmd: Some(launch_command(&model)),
            model: Some(model),
            extra: Map::new(),
        }
    }

    /// Model ids this record refers to, in priority order.
    ///
    /// The `model` field wins. Older records only carry the id inside `cmd`
    /// (after `--model`), and the oldest ones use a `provider/model` id.
    pub fn referenced_model_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();

        if let Some(model) = self.model.as_deref().filter(|m| !m.trim().is_empty()) {
            ids.push(model.trim());
            return ids;
        }

        if let Some(flag) = self.cmd.as_deref().and_then(extract_model_flag) {
            ids.push(flag);
        }
        if self.id.contains('/') && !ids.contains(&self.id.as_str()) {
            ids.push(self.id.as_str());
        }
        ids
    }

    /// The model id the launch command should use.
    pub fn launch_model(&self) -> Option<&str> {
        self.referenced_model_ids().into_iter().next()
    }

    /// Command to run for this record, derived from the model id when possible.
    pub fn launch_command(&self) -> Option<String> {
        match self.launch_model() {
            Some(model) => Some(launch_command(model)),
            None => self.cmd.clone(),
        }
    }

    pub fn is_manual(&self) -> bool {
        is_manual_id(&self.id)
    }

    pub fn is_ollama(&self) -> bool {
        is_ollama_id(&self.id)
    }
}

/// The whole of models.json: an ordered list of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelsDocument {
    pub records: Vec<ModelRecord>,
}

impl ModelsDocument {
    pub fn new(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelRecord> {
        self.records.iter()
    }

    /// Find the first record that launches the given model id or has it as id.
    pub fn find_by_model(&self, model: &str) -> Option<&ModelRecord> {
        self.records
            .iter()
            .find(|r| r.id == model || r.launch_model() == Some(model))
    }
}
