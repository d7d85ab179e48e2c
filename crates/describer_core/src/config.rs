use std::fmt;

/// Text-generation backend used for descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiProvider {
    #[default]
    Gemini,
    /// Any endpoint speaking the OpenAI chat completions API. Needs `base_url`.
    OpenAiCompatible,
}

impl AiProvider {
    pub fn id(self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini",
            AiProvider::OpenAiCompatible => "openai",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(AiProvider::Gemini),
            "openai" | "openai-compatible" => Some(AiProvider::OpenAiCompatible),
            _ => None,
        }
    }

    pub fn uses_base_url(self) -> bool {
        matches!(self, AiProvider::OpenAiCompatible)
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::Gemini => write!(f, "Google Gemini"),
            AiProvider::OpenAiCompatible => write!(f, "OpenAI compatible"),
        }
    }
}

/// Provider settings. Values are opaque; nothing here validates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Returns a copy with exactly one field replaced.
    pub fn with_field(mut self, field: ConfigField) -> Self {
        match field {
            ConfigField::Provider(provider) => self.provider = provider,
            ConfigField::ApiKey(value) => self.api_key = value,
            ConfigField::BaseUrl(value) => self.base_url = value,
            ConfigField::Model(value) => self.model = value,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigField {
    Provider(AiProvider),
    ApiKey(String),
    BaseUrl(String),
    Model(String),
}
