#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use describer_core::{AiConfig, LinkItem};
use describer_engine::{
    BatchEvent, BatchSink, CancellationToken, DescriptionGenerator, FailureKind, GenerateError,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(describer_logging::initialize_for_tests);
}

pub fn keyed_config() -> AiConfig {
    AiConfig {
        api_key: "test-key".to_string(),
        ..AiConfig::default()
    }
}

/// Generator answering from a per-title script, recording every call.
#[derive(Default)]
pub struct ScriptedGenerator {
    failing: Vec<String>,
    stop_during: HashMap<String, CancellationToken>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, title: &str) -> Self {
        self.failing.push(title.to_string());
        self
    }

    /// Raises `stop` while the call for `title` is in flight.
    pub fn stopping_during(mut self, title: &str, stop: CancellationToken) -> Self {
        self.stop_during.insert(title.to_string(), stop);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DescriptionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        title: &str,
        _url: &str,
        _config: &AiConfig,
    ) -> Result<String, GenerateError> {
        self.calls.lock().unwrap().push(title.to_string());
        if let Some(stop) = self.stop_during.get(title) {
            stop.cancel();
        }
        tokio::task::yield_now().await;
        if self.failing.iter().any(|t| t == title) {
            return Err(GenerateError {
                kind: FailureKind::HttpStatus(429),
                message: "rate limited".to_string(),
            });
        }
        Ok(format!("About {title}"))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BatchEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BatchEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn publishes(&self) -> Vec<Vec<LinkItem>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BatchEvent::LinksPublished(links) => Some(links),
                _ => None,
            })
            .collect()
    }
}

impl BatchSink for RecordingSink {
    fn emit(&self, event: BatchEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn link(id: u64, title: &str) -> LinkItem {
    LinkItem::new(id, title, format!("https://{}.example", title.to_lowercase()))
}
