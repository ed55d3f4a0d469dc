//! Built-in and custom applet menu items.

use serde::Serialize;
use serde_json::{Map, Value};

/// Number of custom menu item slots the applet renders.
pub const MAX_CUSTOM_ITEMS: usize = 3;

/// Menu items the applet knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    Title,
    Models,
    Start,
    Stop,
    Restart,
    Dashboard,
    Json,
    Folder,
    Doctor,
    Settings,
    Credits,
}

impl MenuItem {
    pub const ALL: [MenuItem; 11] = [
        MenuItem::Title,
        MenuItem::Models,
        MenuItem::Start,
        MenuItem::Stop,
        MenuItem::Restart,
        MenuItem::Dashboard,
        MenuItem::Json,
        MenuItem::Folder,
        MenuItem::Doctor,
        MenuItem::Settings,
        MenuItem::Credits,
    ];

    /// Items whose visibility the settings editor controls.
    pub const TOGGLEABLE: [MenuItem; 8] = [
        MenuItem::Models,
        MenuItem::Start,
        MenuItem::Stop,
        MenuItem::Restart,
        MenuItem::Dashboard,
        MenuItem::Json,
        MenuItem::Folder,
        MenuItem::Doctor,
    ];

    /// Key in menu.json.
    pub fn key(self) -> &'static str {
        match self {
            MenuItem::Title => "title",
            MenuItem::Models => "oc_models",
            MenuItem::Start => "oc_start",
            MenuItem::Stop => "oc_stop",
            MenuItem::Restart => "oc_restart",
            MenuItem::Dashboard => "oc_dashboard",
            MenuItem::Json => "oc_json",
            MenuItem::Folder => "oc_folder",
            MenuItem::Doctor => "oc_doctor",
            MenuItem::Settings => "settings",
            MenuItem::Credits => "credits",
        }
    }

    /// Text the applet shows when menu.json has no label.
    pub fn default_label(self) -> &'static str {
        match self {
            MenuItem::Title => "Claw Control",
            MenuItem::Models => "OC Models",
            MenuItem::Start => "OC Start",
            MenuItem::Stop => "OC Stop",
            MenuItem::Restart => "OC Restart",
            MenuItem::Dashboard => "OC Dashboard",
            MenuItem::Json => "OC Json",
            MenuItem::Folder => "OC Folder",
            MenuItem::Doctor => "OC Doctor",
            MenuItem::Settings => "Settings",
            MenuItem::Credits => "v1 - ByFarmfield - 2026",
        }
    }

    /// Checkbox text in the settings editor.
    pub fn toggle_label(self) -> &'static str {
        match self {
            MenuItem::Models => "OC Models submenu",
            other => other.default_label(),
        }
    }

    /// Title and credits store their text under `text` instead of `label`.
    pub fn uses_text_field(self) -> bool {
        matches!(self, MenuItem::Title | MenuItem::Credits)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.key() == key)
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for MenuItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::from_key(key)
            .or_else(|| Self::from_key(&format!("oc_{}", key)))
            .ok_or_else(|| format!("Unknown menu item: {}", s))
    }
}

/// Visibility and label of one built-in item in menu.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemEntry {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// The applet treats anything but an explicit `false` as enabled.
fn enabled_field(object: &Map<String, Value>) -> bool {
    object.get("enabled") != Some(&Value::Bool(false))
}

fn string_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    object.get(name).and_then(|v| v.as_str()).map(str::to_string)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl MenuItemEntry {
    /// Read an entry field by field; `None` unless `value` is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            enabled: enabled_field(object),
            label: string_field(object, "label"),
            text: string_field(object, "text"),
        })
    }

    /// The entry the applet falls back to when menu.json is missing.
    pub fn default_for(item: MenuItem) -> Self {
        let label = item.default_label().to_string();
        if item.uses_text_field() {
            Self {
                enabled: true,
                label: None,
                text: Some(label),
            }
        } else {
            Self {
                enabled: true,
                label: Some(label),
                text: None,
            }
        }
    }

    /// Label the applet will display: `label`, then `text`, then the default.
    pub fn display_label(&self, item: MenuItem) -> String {
        non_empty(&self.label)
            .or_else(|| non_empty(&self.text))
            .unwrap_or(item.default_label())
            .to_string()
    }
}

/// A user-defined menu entry running an arbitrary command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomMenuItem {
    pub title: String,
    pub command: String,
    pub enabled: bool,
}

impl Default for CustomMenuItem {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl CustomMenuItem {
    pub fn new(title: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            command: command.into(),
            enabled: true,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            title: string_field(object, "title").unwrap_or_default(),
            command: string_field(object, "command").unwrap_or_default(),
            enabled: enabled_field(object),
        })
    }

    /// Key of the n-th slot (1-based) in menu.json.
    pub fn key(slot: usize) -> String {
        format!("custom_{}", slot)
    }

    /// A slot is only written when it has a title or a command.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.command.trim().is_empty()
    }

    /// The applet only draws items that have a command.
    pub fn is_renderable(&self) -> bool {
        self.enabled && !self.command.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_round_trip() {
        for item in MenuItem::ALL {
            assert_eq!(MenuItem::from_key(item.key()), Some(item));
        }
    }

    #[test]
    fn test_parse_accepts_short_names() {
        assert_eq!("oc_start".parse::<MenuItem>().unwrap(), MenuItem::Start);
        assert_eq!("doctor".parse::<MenuItem>().unwrap(), MenuItem::Doctor);
        assert!("bogus".parse::<MenuItem>().is_err());
    }

    #[test]
    fn test_toggleable_excludes_title_and_footer() {
        assert!(!MenuItem::TOGGLEABLE.contains(&MenuItem::Title));
        assert!(!MenuItem::TOGGLEABLE.contains(&MenuItem::Settings));
        assert!(!MenuItem::TOGGLEABLE.contains(&MenuItem::Credits));
    }

    #[test]
    fn test_default_entry_uses_text_for_title() {
        let title = MenuItemEntry::default_for(MenuItem::Title);
        assert_eq!(title.text.as_deref(), Some("Claw Control"));
        assert!(title.label.is_none());

        let start = MenuItemEntry::default_for(MenuItem::Start);
        assert_eq!(start.label.as_deref(), Some("OC Start"));
    }

    #[test]
    fn test_entry_defaults_to_enabled() {
        let entry = MenuItemEntry::from_value(&json!({})).unwrap();
        assert!(entry.enabled);
        assert_eq!(entry.display_label(MenuItem::Json), "OC Json");
    }

    #[test]
    fn test_entry_only_explicit_false_disables() {
        let hidden = MenuItemEntry::from_value(&json!({"enabled": false, "label": 5})).unwrap();
        assert!(!hidden.enabled);
        assert!(hidden.label.is_none());
        assert_eq!(hidden.display_label(MenuItem::Doctor), "OC Doctor");

        for enabled in [json!("yes"), json!(0), json!(null), json!("false")] {
            let entry = MenuItemEntry::from_value(&json!({"enabled": enabled})).unwrap();
            assert!(entry.enabled);
        }
        assert!(MenuItemEntry::from_value(&json!("broken")).is_none());
    }

    #[test]
    fn test_custom_item_reads_fields_separately() {
        let item =
            CustomMenuItem::from_value(&json!({"title": 3, "command": "htop", "enabled": false}))
                .unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.command, "htop");
        assert!(!item.enabled);
        assert!(!item.is_renderable());
    }

    #[test]
    fn test_display_label_prefers_label_then_text() {
        let entry = MenuItemEntry {
            enabled: true,
            label: None,
            text: Some("My Claw".to_string()),
        };
        assert_eq!(entry.display_label(MenuItem::Title), "My Claw");
    }

    #[test]
    fn test_custom_item_blankness() {
        assert!(CustomMenuItem::default().is_blank());
        assert!(CustomMenuItem::new("  ", " ").is_blank());
        assert!(!CustomMenuItem::new("Top", "").is_blank());
        assert!(!CustomMenuItem::new("Top", "").is_renderable());
        assert!(CustomMenuItem::new("Top", "htop").is_renderable());
    }
}
