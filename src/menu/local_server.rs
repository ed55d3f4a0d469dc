//! Ollama local/remote inference server settings (`menu.json["ollama"]`).

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_IP: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 11434;

/// Maximum number of local-server models.
pub const MAX_LOCAL_MODELS: usize = 10;

/// A model served by the local server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalModel {
    pub name: String,
    pub id: String,
}

impl LocalModel {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        Some(Self::new(
            string_field(entry, "name").unwrap_or_default(),
            string_field(entry, "id").unwrap_or_default(),
        ))
    }
}

/// The `ollama` section of menu.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalServerConfig {
    pub enabled: bool,
    pub custom_address: bool,
    pub ip: String,
    pub port: u16,
    pub models: Vec<LocalModel>,
}

impl Default for LocalServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            custom_address: false,
            ip: DEFAULT_IP.to_string(),
            port: DEFAULT_PORT,
            models: Vec::new(),
        }
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    object.get(name).and_then(|v| v.as_str()).map(str::to_string)
}

/// Ports are numbers, or strings in older files.
fn port_from_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|port| u16::try_from(port).ok())
            .filter(|port| *port != 0),
        Value::String(text) => parse_port(text),
        _ => None,
    }
}

impl LocalServerConfig {
    /// Read the section one field at a time. A field of the wrong type falls
    /// back to its default without discarding the others.
    pub fn from_value(value: &Value) -> Option<Self> {
        let section = value.as_object()?;
        let flag = |name: &str| section.get(name).and_then(|v| v.as_bool()).unwrap_or(false);

        let port = match section.get("port") {
            None | Some(Value::Null) => DEFAULT_PORT,
            Some(raw) => port_from_value(raw).unwrap_or_else(|| {
                tracing::warn!(port = %raw, "Invalid local server port, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
        };

        let models = section
            .get("models")
            .and_then(|v| v.as_array())
            .map(|list| list.iter().filter_map(LocalModel::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            enabled: flag("enabled"),
            custom_address: flag("custom_address"),
            ip: string_field(section, "ip").unwrap_or_else(|| DEFAULT_IP.to_string()),
            port,
            models,
        })
    }

    /// Base URL of the server the applet should talk to.
    pub fn base_url(&self) -> String {
        if self.custom_address {
            format!("http://{}:{}", self.ip, self.port)
        } else {
            format!("http://{}:{}", DEFAULT_IP, DEFAULT_PORT)
        }
    }
}

/// Parse a port typed by the user; empty input means the default port.
pub fn parse_port(input: &str) -> Option<u16> {
    let input = input.trim();
    if input.is_empty() {
        return Some(DEFAULT_PORT);
    }
    input.parse().ok().filter(|port| *port != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Reading Tests
    // =========================================================================

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = LocalServerConfig::from_value(&json!({})).unwrap();
        assert_eq!(config, LocalServerConfig::default());
        assert_eq!(config.ip, "127.0.0.1");
        assert_eq!(config.port, 11434);
    }

    #[test]
    fn test_non_object_section_is_absent() {
        assert!(LocalServerConfig::from_value(&json!("on")).is_none());
        assert!(LocalServerConfig::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_port_accepts_string() {
        let config = LocalServerConfig::from_value(&json!({"port": "8080"})).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_bad_port_keeps_other_fields() {
        let section = json!({
            "enabled": true,
            "custom_address": true,
            "ip": "10.0.0.5",
            "port": 70000,
            "models": [{"name": "Llama", "id": "ollama/llama3.3"}]
        });
        let config = LocalServerConfig::from_value(&section).unwrap();

        assert_eq!(config.port, 11434);
        assert!(config.enabled);
        assert!(config.custom_address);
        assert_eq!(config.ip, "10.0.0.5");
        assert_eq!(config.models, vec![LocalModel::new("Llama", "ollama/llama3.3")]);

        for port in [json!("eighty"), json!(0), json!(-1), json!(true)] {
            let config = LocalServerConfig::from_value(&json!({"port": port})).unwrap();
            assert_eq!(config.port, 11434);
        }
    }

    #[test]
    fn test_odd_model_entries() {
        let section = json!({
            "enabled": "yes",
            "models": [
                {"name": "Qwen", "id": 7},
                "ollama/phi4",
                {"name": "Phi", "id": "ollama/phi4"}
            ]
        });
        let config = LocalServerConfig::from_value(&section).unwrap();

        assert!(!config.enabled);
        assert_eq!(
            config.models,
            vec![LocalModel::new("Qwen", ""), LocalModel::new("Phi", "ollama/phi4")]
        );
    }

    // =========================================================================
    // Writing Tests
    // =========================================================================

    #[test]
    fn test_serializes_port_as_number() {
        let config = LocalServerConfig {
            port: 9000,
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["port"], json!(9000));
        assert_eq!(value["models"], json!([]));
    }

    #[test]
    fn test_base_url() {
        let mut config = LocalServerConfig {
            ip: "10.0.0.5".to_string(),
            port: 1234,
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:11434");
        config.custom_address = true;
        assert_eq!(config.base_url(), "http://10.0.0.5:1234");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(""), Some(11434));
        assert_eq!(parse_port(" 8080 "), Some(8080));
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("70000"), None);
        assert_eq!(parse_port("abc"), None);
    }
}
