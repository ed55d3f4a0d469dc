//! Model identifier normalization.
//!
//! The same model can be spelled several ways in models.json:
//! `moonshot/kimi-k2.5`, `moonshotai/kimi-k2.5`, `openrouter/moonshotai/kimi-k2.5`.
//! Comparisons go through [`CanonicalKey`], which folds the spelling
//! variants but keeps OpenRouter mirrors distinct from direct access.

use regex::Regex;
use std::sync::OnceLock;

pub const OPENROUTER_PREFIX: &str = "openrouter/";
pub const MANUAL_PREFIX: &str = "manual_";
pub const OLLAMA_PREFIX: &str = "ollama/";

const MOONSHOT_ALIAS: &str = "moonshotai/";
const MOONSHOT_PROVIDER: &str = "moonshot/";

/// Normalize a model id to the form used by catalog keys.
///
/// Strips a leading `openrouter/` and renames the `moonshotai/` provider to
/// `moonshot/`.
pub fn normalize_model_id(id: &str) -> String {
    let id = id.strip_prefix(OPENROUTER_PREFIX).unwrap_or(id);
    match id.strip_prefix(MOONSHOT_ALIAS) {
        Some(rest) => format!("{}{}", MOONSHOT_PROVIDER, rest),
        None => id.to_string(),
    }
}

/// Spelling-independent identity of a model id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    /// Reached through the OpenRouter mirror
    pub mirror: bool,
    /// Normalized `provider/model` path
    pub path: String,
}

impl CanonicalKey {
    pub fn of(id: &str) -> Self {
        let id = id.trim();
        Self {
            mirror: id.starts_with(OPENROUTER_PREFIX),
            path: normalize_model_id(id),
        }
    }
}

fn model_flag_regex() -> &'static Regex {
    static MODEL_FLAG_RE: OnceLock<Regex> = OnceLock::new();
    MODEL_FLAG_RE.get_or_init(|| Regex::new(r"--model\s+(\S+)").expect("valid --model regex"))
}

/// Extract the value of the `--model` flag from a launch command.
pub fn extract_model_flag(cmd: &str) -> Option<&str> {
    model_flag_regex()
        .captures(cmd)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Prefix a local-server model id with `ollama/` unless it already is.
pub fn ensure_ollama_prefix(id: &str) -> String {
    if id.starts_with(OLLAMA_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", OLLAMA_PREFIX, id)
    }
}

/// True for record ids owned by the manual-models section.
pub fn is_manual_id(id: &str) -> bool {
    id.starts_with(MANUAL_PREFIX)
}

/// True for record ids owned by the local-server section.
pub fn is_ollama_id(id: &str) -> bool {
    id.starts_with(OLLAMA_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // normalize_model_id Tests
    // =========================================================================

    #[test]
    fn test_normalize_plain_id_unchanged() {
        assert_eq!(normalize_model_id("openai/gpt-5.2"), "openai/gpt-5.2");
    }

    #[test]
    fn test_normalize_strips_openrouter() {
        assert_eq!(
            normalize_model_id("openrouter/google/gemini-3-pro"),
            "google/gemini-3-pro"
        );
    }

    #[test]
    fn test_normalize_renames_moonshotai() {
        assert_eq!(normalize_model_id("moonshotai/kimi-k2.5"), "moonshot/kimi-k2.5");
        assert_eq!(
            normalize_model_id("openrouter/moonshotai/kimi-k2.5"),
            "moonshot/kimi-k2.5"
        );
    }

    #[test]
    fn test_normalize_only_strips_leading_prefix() {
        assert_eq!(
            normalize_model_id("custom/openrouter/thing"),
            "custom/openrouter/thing"
        );
    }

    // =========================================================================
    // CanonicalKey Tests
    // =========================================================================

    #[test]
    fn test_canonical_key_folds_moonshot_spellings() {
        assert_eq!(
            CanonicalKey::of("moonshotai/kimi-k2.5"),
            CanonicalKey::of("moonshot/kimi-k2.5")
        );
        assert_eq!(
            CanonicalKey::of("openrouter/moonshot/kimi-k2.5"),
            CanonicalKey::of("openrouter/moonshotai/kimi-k2.5")
        );
    }

    #[test]
    fn test_canonical_key_keeps_mirror_distinct() {
        assert_ne!(
            CanonicalKey::of("openrouter/zai/glm-5"),
            CanonicalKey::of("zai/glm-5")
        );
    }

    #[test]
    fn test_canonical_key_trims_whitespace() {
        assert_eq!(CanonicalKey::of("  zai/glm-5 "), CanonicalKey::of("zai/glm-5"));
    }

    // =========================================================================
    // extract_model_flag Tests
    // =========================================================================

    #[test]
    fn test_extract_model_flag() {
        let cmd = "/usr/bin/openclaw sessions patch agent:main:main --model openrouter/zai/glm-5 && /usr/bin/openclaw sessions clear";
        assert_eq!(extract_model_flag(cmd), Some("openrouter/zai/glm-5"));
    }

    #[test]
    fn test_extract_model_flag_extra_whitespace() {
        assert_eq!(extract_model_flag("x --model \t a/b"), Some("a/b"));
    }

    #[test]
    fn test_extract_model_flag_missing() {
        assert_eq!(extract_model_flag("openclaw models set a/b"), None);
        assert_eq!(extract_model_flag("--model"), None);
    }

    // =========================================================================
    // Prefix Tests
    // =========================================================================

    #[test]
    fn test_ensure_ollama_prefix() {
        assert_eq!(ensure_ollama_prefix("llama3.3"), "ollama/llama3.3");
        assert_eq!(ensure_ollama_prefix("ollama/llama3.3"), "ollama/llama3.3");
    }

    #[test]
    fn test_section_prefixes() {
        assert!(is_manual_id("manual_openai/gpt-4-turbo"));
        assert!(!is_manual_id("openai/gpt-4-turbo"));
        assert!(is_ollama_id("ollama/deepseek-r1:32b"));
        assert!(!is_ollama_id("manual_ollama/x"));
    }
}
