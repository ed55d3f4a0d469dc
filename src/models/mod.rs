//! Model catalog, identifiers and models.json records.
//!
//! This module handles:
//! - The built-in catalog of hosted models
//! - Normalizing model ids across naming conventions
//! - Building the launch command for a model
//! - Reading and writing models.json records

pub mod catalog;
pub mod command;
pub mod ids;
pub mod records;

pub use catalog::{catalog, CatalogEntry, CatalogGroup};
pub use command::{launch_command, LaunchError, LaunchResult, LaunchRunner};
pub use ids::{normalize_model_id, CanonicalKey};
pub use records::{ModelRecord, ModelsDocument};
