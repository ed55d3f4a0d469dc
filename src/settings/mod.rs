//! Settings editor state and persistence.
//!
//! - [`form`] - the editable state of every section
//! - [`reconcile`] - mapping between the JSON documents and the form
//! - [`store`] - reading and writing both files

mod error;
pub mod form;
pub mod reconcile;
pub mod store;

pub use error::SettingsError;
pub use form::{LocalServerForm, ManualModel, SettingsForm, MAX_MANUAL_MODELS};
pub use reconcile::{build_menu_document, build_models_document, classify, load_form, RecordOwner};
pub use store::SettingsStore;
