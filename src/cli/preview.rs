//! Text rendering of the applet menu.
//!
//! Mirrors how the panel applet builds its popup from models.json and
//! menu.json, so changes can be checked without reopening the panel.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::config::FileState;
use crate::menu::{MenuDocument, MenuItem, MAX_CUSTOM_ITEMS};
use crate::models::ids::MANUAL_PREFIX;
use crate::models::{ModelRecord, ModelsDocument};

/// Longest model label the applet draws before cutting it off.
pub const MAX_DISPLAY_CHARS: usize = 25;

const OTHER_PROVIDER: &str = "Other";

/// One rendered line of the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    Header(String),
    Separator,
    Submenu(String),
    Provider(String),
    Model(String),
    Item(String),
    Footer(String),
    Empty(String),
}

fn set_arg_regex() -> &'static Regex {
    static SET_ARG_RE: OnceLock<Regex> = OnceLock::new();
    SET_ARG_RE.get_or_init(|| Regex::new(r"set\s+(\S+)").expect("valid set regex"))
}

fn word_start_regex() -> &'static Regex {
    static WORD_START_RE: OnceLock<Regex> = OnceLock::new();
    WORD_START_RE.get_or_init(|| Regex::new(r"\b\w").expect("valid word regex"))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn provider_of_path(path: &str) -> Option<String> {
    let path = path.strip_prefix(MANUAL_PREFIX).unwrap_or(path);
    if !path.contains('/') {
        return None;
    }
    path.split('/').next().map(capitalize)
}

/// Provider heading a record is filed under.
pub fn provider_heading(record: &ModelRecord) -> String {
    record
        .cmd
        .as_deref()
        .and_then(|cmd| set_arg_regex().captures(cmd))
        .and_then(|caps| caps.get(1))
        .and_then(|m| provider_of_path(m.as_str()))
        .or_else(|| provider_of_path(&record.id))
        .unwrap_or_else(|| OTHER_PROVIDER.to_string())
}

/// Label drawn for a model under `provider`.
pub fn display_name(name: &str, provider: &str) -> String {
    let mut label = name.to_string();

    if let Some(last) = name.rsplit('/').next().filter(|_| name.contains('/')) {
        let spaced = last.replace('-', " ");
        label = word_start_regex()
            .replace_all(&spaced, |caps: &regex::Captures| caps[0].to_uppercase())
            .into_owned();
    }

    let prefix = format!("{} ", provider.to_lowercase());
    if label.to_lowercase().starts_with(&prefix) {
        label = label.chars().skip(prefix.chars().count()).collect();
    }

    if label.chars().count() > MAX_DISPLAY_CHARS {
        let cut: String = label.chars().take(MAX_DISPLAY_CHARS).collect();
        label = format!("{}...", cut);
    }
    label
}

/// Records grouped by provider heading, headings sorted.
pub fn group_by_provider(models: &ModelsDocument) -> BTreeMap<String, Vec<&ModelRecord>> {
    let mut groups: BTreeMap<String, Vec<&ModelRecord>> = BTreeMap::new();
    for record in models.iter() {
        groups.entry(provider_heading(record)).or_default().push(record);
    }
    groups
}

/// Lines of the popup in the order the applet adds them.
///
/// `menu_state` is how menu.json was read; only a parsed file can hide items.
pub fn build_preview(
    models: &ModelsDocument,
    menu: &MenuDocument,
    menu_state: &FileState,
) -> Vec<PreviewLine> {
    let mut lines = Vec::new();
    let shows = |item: MenuItem| menu.applet_shows(item, menu_state);

    if shows(MenuItem::Title) {
        lines.push(PreviewLine::Header(menu.item_label(MenuItem::Title)));
        lines.push(PreviewLine::Separator);
    }

    if shows(MenuItem::Models) {
        lines.push(PreviewLine::Submenu(menu.item_label(MenuItem::Models)));
        if models.is_empty() {
            lines.push(PreviewLine::Empty("No models configured".to_string()));
        }
        for (index, (provider, records)) in group_by_provider(models).into_iter().enumerate() {
            if index > 0 {
                lines.push(PreviewLine::Separator);
            }
            lines.push(PreviewLine::Provider(format!("{}:", provider)));
            for record in records {
                lines.push(PreviewLine::Model(display_name(&record.name, &provider)));
            }
        }
        lines.push(PreviewLine::Separator);
    }

    for item in [MenuItem::Start, MenuItem::Stop, MenuItem::Restart] {
        if shows(item) {
            lines.push(PreviewLine::Item(menu.item_label(item)));
        }
    }

    if shows(MenuItem::Dashboard) {
        lines.push(PreviewLine::Separator);
        lines.push(PreviewLine::Item(menu.item_label(MenuItem::Dashboard)));
    }

    if shows(MenuItem::Json) || shows(MenuItem::Folder) {
        lines.push(PreviewLine::Separator);
        for item in [MenuItem::Json, MenuItem::Folder] {
            if shows(item) {
                lines.push(PreviewLine::Item(menu.item_label(item)));
            }
        }
    }

    if shows(MenuItem::Doctor) {
        lines.push(PreviewLine::Separator);
        lines.push(PreviewLine::Item(menu.item_label(MenuItem::Doctor)));
    }

    for slot in 1..=MAX_CUSTOM_ITEMS {
        let Some(custom) = menu.custom_item(slot) else {
            continue;
        };
        if !custom.is_renderable() {
            continue;
        }
        if slot == 1 {
            lines.push(PreviewLine::Separator);
        }
        let title = if custom.title.is_empty() {
            format!("Custom {}", slot)
        } else {
            custom.title
        };
        lines.push(PreviewLine::Item(title));
    }

    if shows(MenuItem::Settings) || shows(MenuItem::Credits) {
        lines.push(PreviewLine::Separator);
        if shows(MenuItem::Settings) {
            lines.push(PreviewLine::Item(menu.item_label(MenuItem::Settings)));
        }
        if shows(MenuItem::Credits) {
            lines.push(PreviewLine::Footer(menu.item_label(MenuItem::Credits)));
        }
    }

    lines
}

/// Print the preview with ANSI styling.
pub fn print_preview(lines: &[PreviewLine]) {
    println!();
    for line in lines {
        match line {
            PreviewLine::Header(text) => println!("  \x1b[1m{}\x1b[0m", text),
            PreviewLine::Separator => println!("  \x1b[2m────────────────────\x1b[0m"),
            PreviewLine::Submenu(text) => println!("  {} ▸", text),
            PreviewLine::Provider(text) => println!("      \x1b[2m{}\x1b[0m", text),
            PreviewLine::Model(text) => println!("        {}", text),
            PreviewLine::Item(text) => println!("  {}", text),
            PreviewLine::Footer(text) => println!("  \x1b[2m{}\x1b[0m", text),
            PreviewLine::Empty(text) => println!("      \x1b[2m{}\x1b[0m", text),
        }
    }
    println!();
}
