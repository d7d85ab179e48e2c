use std::time::Duration;

use describer_core::{AiConfig, AiProvider};
use describer_logging::describer_debug;
use serde_json::{json, Value};
use url::Url;

use crate::prompt::{build_prompt, clean_description, SYSTEM_PROMPT};
use crate::{FailureKind, GenerateError};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Longest error body kept in a [`GenerateError`] message.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub connect_timeout: Duration,
    /// `None` lets a call run as long as the provider takes.
    pub request_timeout: Option<Duration>,
    pub gemini_base_url: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_output_tokens: 256,
            temperature: 0.3,
        }
    }
}

/// Produces a description for one link.
#[async_trait::async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(
        &self,
        title: &str,
        url: &str,
        config: &AiConfig,
    ) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct HttpDescriptionGenerator {
    settings: GeneratorSettings,
}

impl HttpDescriptionGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    fn gemini_request(
        &self,
        client: &reqwest::Client,
        config: &AiConfig,
        prompt: &str,
    ) -> Result<reqwest::RequestBuilder, GenerateError> {
        let model = model_or_default(config, DEFAULT_GEMINI_MODEL);
        let endpoint = join_endpoint(
            &self.settings.gemini_base_url,
            &format!("models/{model}:generateContent"),
        )?;
        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": self.settings.max_output_tokens,
                "temperature": self.settings.temperature,
            }
        });
        Ok(client
            .post(endpoint)
            .header("x-goog-api-key", config.api_key.trim())
            .json(&body))
    }

    fn openai_request(
        &self,
        client: &reqwest::Client,
        config: &AiConfig,
        prompt: &str,
    ) -> Result<reqwest::RequestBuilder, GenerateError> {
        let base = if config.base_url.trim().is_empty() {
            DEFAULT_OPENAI_BASE_URL
        } else {
            config.base_url.trim()
        };
        let endpoint = join_endpoint(base, "chat/completions")?;
        let body = json!({
            "model": model_or_default(config, DEFAULT_OPENAI_MODEL),
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": self.settings.max_output_tokens,
            "temperature": self.settings.temperature,
        });
        Ok(client
            .post(endpoint)
            .bearer_auth(config.api_key.trim())
            .json(&body))
    }
}

#[async_trait::async_trait]
impl DescriptionGenerator for HttpDescriptionGenerator {
    async fn generate(
        &self,
        title: &str,
        url: &str,
        config: &AiConfig,
    ) -> Result<String, GenerateError> {
        if !config.has_api_key() {
            return Err(GenerateError::new(
                FailureKind::MissingApiKey,
                "no api key configured",
            ));
        }

        let client = self.build_client()?;
        let prompt = build_prompt(title, url);
        let request = match config.provider {
            AiProvider::Gemini => self.gemini_request(&client, config, &prompt)?,
            AiProvider::OpenAiCompatible => self.openai_request(&client, config, &prompt)?,
        };

        describer_debug!("Requesting description provider={} url={}", config.provider.id(), url);
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                truncate(&body, MAX_ERROR_BODY),
            ));
        }

        let payload: Value = response.json().await.map_err(|err| {
            if err.is_timeout() {
                map_reqwest_error(err)
            } else {
                GenerateError::new(FailureKind::MalformedResponse, err.to_string())
            }
        })?;

        let text = extract_text(config.provider, &payload).ok_or_else(|| {
            GenerateError::new(
                FailureKind::MalformedResponse,
                "response carries no text candidate",
            )
        })?;

        clean_description(text)
            .ok_or_else(|| GenerateError::new(FailureKind::EmptyResponse, "blank description"))
    }
}

fn model_or_default<'a>(config: &'a AiConfig, fallback: &'a str) -> &'a str {
    let model = config.model.trim();
    if model.is_empty() {
        fallback
    } else {
        model
    }
}

fn join_endpoint(base: &str, path: &str) -> Result<Url, GenerateError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse(&joined)
        .map_err(|err| GenerateError::new(FailureKind::InvalidBaseUrl, format!("{base}: {err}")))
}

fn extract_text(provider: AiProvider, payload: &Value) -> Option<&str> {
    let pointer = match provider {
        AiProvider::Gemini => "/candidates/0/content/parts/0/text",
        AiProvider::OpenAiCompatible => "/choices/0/message/content",
    };
    payload.pointer(pointer).and_then(Value::as_str)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return GenerateError::new(FailureKind::InvalidBaseUrl, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
