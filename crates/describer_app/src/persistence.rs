use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use describer_core::{AiConfig, AiProvider, LinkItem};
use describer_engine::AtomicFileWriter;
use describer_logging::{describer_info, describer_warn};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = ".describer_config.ron";
pub(crate) const LINKS_FILENAME: &str = "links.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedConfig {
    provider: String,
    api_key: String,
    #[serde(default)]
    base_url: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    saved_utc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedLink {
    id: u64,
    title: String,
    url: String,
    #[serde(default)]
    description: Option<String>,
}

/// Owner-side storage for the saved config and the link collection.
#[derive(Debug, Clone)]
pub(crate) struct Store {
    writer: AtomicFileWriter,
}

impl Store {
    pub(crate) fn new(data_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(data_dir),
        }
    }

    /// Missing or unreadable config yields the default.
    pub(crate) fn load_config(&self) -> AiConfig {
        let Some(content) = self.read_or_warn(CONFIG_FILENAME) else {
            return AiConfig::default();
        };
        let persisted: PersistedConfig = match ron::from_str(&content) {
            Ok(persisted) => persisted,
            Err(err) => {
                describer_warn!("Failed to parse {}: {}", CONFIG_FILENAME, err);
                return AiConfig::default();
            }
        };

        let provider = AiProvider::from_id(&persisted.provider).unwrap_or_else(|| {
            describer_warn!(
                "Unknown provider {:?} in {}, using default",
                persisted.provider,
                CONFIG_FILENAME
            );
            AiProvider::default()
        });
        AiConfig {
            provider,
            api_key: persisted.api_key,
            base_url: persisted.base_url,
            model: persisted.model,
        }
    }

    pub(crate) fn save_config(&self, config: &AiConfig) -> anyhow::Result<()> {
        let persisted = PersistedConfig {
            provider: config.provider.id().to_string(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            saved_utc: Some(Utc::now().to_rfc3339()),
        };
        self.write_ron(CONFIG_FILENAME, &persisted)?;
        describer_info!("Saved config provider={}", config.provider.id());
        Ok(())
    }

    /// Missing or unreadable link file yields an empty collection.
    pub(crate) fn load_links(&self) -> Vec<LinkItem> {
        let Some(content) = self.read_or_warn(LINKS_FILENAME) else {
            return Vec::new();
        };
        let persisted: Vec<PersistedLink> = match ron::from_str(&content) {
            Ok(persisted) => persisted,
            Err(err) => {
                describer_warn!("Failed to parse {}: {}", LINKS_FILENAME, err);
                return Vec::new();
            }
        };

        persisted
            .into_iter()
            .map(|link| LinkItem {
                id: link.id,
                title: link.title,
                url: link.url,
                description: link.description,
            })
            .collect()
    }

    pub(crate) fn save_links(&self, links: &[LinkItem]) -> anyhow::Result<()> {
        let persisted: Vec<PersistedLink> = links
            .iter()
            .map(|link| PersistedLink {
                id: link.id,
                title: link.title.clone(),
                url: link.url.clone(),
                description: link.description.clone(),
            })
            .collect();
        self.write_ron(LINKS_FILENAME, &persisted)
    }

    fn read_or_warn(&self, filename: &str) -> Option<String> {
        match self.writer.read(filename) {
            Ok(content) => content,
            Err(err) => {
                describer_warn!(
                    "Failed to read {:?} from {:?}: {}",
                    filename,
                    self.writer.dir(),
                    err
                );
                None
            }
        }
    }

    fn write_ron<T: Serialize>(&self, filename: &str, value: &T) -> anyhow::Result<()> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(value, pretty)
            .with_context(|| format!("serializing {filename}"))?;
        self.writer
            .write(filename, &content)
            .with_context(|| format!("writing {filename} to {:?}", self.writer.dir()))?;
        Ok(())
    }
}

/// Next free id: one past the largest in use.
pub(crate) fn next_link_id(links: &[LinkItem]) -> u64 {
    links.iter().map(|link| link.id).max().map_or(1, |max| max + 1)
}
