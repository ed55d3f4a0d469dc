//! Built-in model catalog.
//!
//! These are the hosted models offered as checkboxes. The left column lists
//! models by provider; the right column lists the same models reached
//! through OpenRouter.

/// Which column of the catalog an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogGroup {
    /// Direct provider access (`provider/model`)
    Provider,
    /// OpenRouter mirror (`openrouter/provider/model`)
    OpenRouterMirror,
}

/// A single catalog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Model id passed to the CLI tool
    pub id: &'static str,
    /// Human-readable model name
    pub display_name: &'static str,
    /// Provider heading the entry is listed under
    pub provider: &'static str,
    pub group: CatalogGroup,
}

impl CatalogEntry {
    const fn provider(provider: &'static str, id: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            display_name,
            provider,
            group: CatalogGroup::Provider,
        }
    }

    const fn mirror(id: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            display_name,
            provider: "OpenRouter",
            group: CatalogGroup::OpenRouterMirror,
        }
    }

    /// Checkbox label, which is also the `name` written to models.json.
    ///
    /// Provider entries read `moonshot ai/kimi-k2.5`; mirrors show their id.
    pub fn label(&self) -> String {
        match self.group {
            CatalogGroup::Provider => format!(
                "{}/{}",
                self.provider.to_lowercase(),
                self.display_name.to_lowercase().replace(' ', "-")
            ),
            CatalogGroup::OpenRouterMirror => self.id.to_string(),
        }
    }

    pub fn is_mirror(&self) -> bool {
        self.group == CatalogGroup::OpenRouterMirror
    }
}

static CATALOG: &[CatalogEntry] = &[
    // Providers
    CatalogEntry::provider("Anthropic", "anthropic/claude-opus-4.6", "Claude Opus 4.6"),
    CatalogEntry::provider("Anthropic", "anthropic/claude-sonnet-4.5", "Claude Sonnet 4.5"),
    CatalogEntry::provider("OpenAI", "openai/gpt-5.3-codex", "GPT-5.3 Codex"),
    CatalogEntry::provider("OpenAI", "openai/gpt-5.2", "GPT-5.2"),
    CatalogEntry::provider("Google", "google/gemini-3-pro", "Gemini 3 Pro"),
    CatalogEntry::provider("Google", "google/gemini-3-flash", "Gemini 3 Flash"),
    CatalogEntry::provider("Moonshot AI", "moonshot/kimi-k2.5", "Kimi K2.5"),
    CatalogEntry::provider("Zhipu AI", "zai/glm-5", "GLM-5"),
    CatalogEntry::provider("DeepSeek", "deepseek/deepseek-v3.2", "DeepSeek V3.2"),
    CatalogEntry::provider("Alibaba", "qwen/qwen-3.5-plus", "Qwen 3.5 Plus"),
    CatalogEntry::provider("xAI", "xai/grok-4.1-fast", "Grok 4.1 Fast"),
    // OpenRouter mirrors
    CatalogEntry::mirror("openrouter/anthropic/claude-opus-4.6", "Anthropic Claude Opus 4.6"),
    CatalogEntry::mirror("openrouter/anthropic/claude-sonnet-4.5", "Anthropic Claude Sonnet 4.5"),
    CatalogEntry::mirror("openrouter/openai/gpt-5.3-codex", "OpenAI GPT-5.3 Codex"),
    CatalogEntry::mirror("openrouter/openai/gpt-5.2", "OpenAI GPT-5.2"),
    CatalogEntry::mirror("openrouter/openai/gpt-5-nano", "OpenAI GPT-5 Nano"),
    CatalogEntry::mirror("openrouter/openai/gpt-4o-mini", "OpenAI GPT-4o Mini"),
    CatalogEntry::mirror("openrouter/google/gemini-3-pro", "Google Gemini 3 Pro"),
    CatalogEntry::mirror("openrouter/google/gemini-3-flash", "Google Gemini 3 Flash"),
    CatalogEntry::mirror(
        "openrouter/google/gemini-2.5-flash-lite-preview-09-2025",
        "Google Gemini 2.5 Flash Lite",
    ),
    CatalogEntry::mirror("openrouter/google/gemini-3-flash-preview", "Google Gemini 3 Flash Preview"),
    CatalogEntry::mirror("openrouter/moonshotai/kimi-k2.5", "Moonshot Kimi K2.5"),
    CatalogEntry::mirror("openrouter/zai/glm-5", "Zhipu GLM-5"),
    CatalogEntry::mirror("openrouter/deepseek/deepseek-v3.2", "DeepSeek V3.2"),
    CatalogEntry::mirror("openrouter/qwen/qwen-3.5-plus", "Alibaba Qwen 3.5 Plus"),
    CatalogEntry::mirror("openrouter/xai/grok-4.1-fast", "xAI Grok 4.1 Fast"),
];

/// All catalog entries, in display order.
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Look up a catalog entry by its exact id.
pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

/// Entries grouped under their provider heading, preserving catalog order.
pub fn by_provider() -> Vec<(&'static str, Vec<&'static CatalogEntry>)> {
    let mut groups: Vec<(&'static str, Vec<&'static CatalogEntry>)> = Vec::new();
    for entry in CATALOG {
        match groups.iter_mut().find(|(name, _)| *name == entry.provider) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((entry.provider, vec![entry])),
        }
    }
    groups
}
