use thiserror::Error;

use crate::config::JsonFileError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    File(#[from] JsonFileError),
    #[error("Unknown catalog model: {0}")]
    UnknownModel(String),
    #[error("{section} slot {slot} is out of range (1-{max})")]
    SlotOutOfRange {
        section: &'static str,
        slot: usize,
        max: usize,
    },
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}
