//! CLI components.

pub mod commands;
pub mod editor;
pub mod preview;

pub use commands::{save_form, LocalServerUpdate};
pub use editor::run_editor;
pub use preview::{build_preview, display_name, print_preview, PreviewLine};
