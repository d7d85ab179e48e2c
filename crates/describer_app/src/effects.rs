use describer_core::Effect;
use describer_engine::EngineHandle;
use describer_logging::{describer_error, describer_info, describer_warn};

use crate::persistence::Store;

/// Executes effects returned by `update` against storage and the engine.
pub(crate) struct EffectRunner {
    store: Store,
    engine: Option<EngineHandle>,
}

impl EffectRunner {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            engine: None,
        }
    }

    pub(crate) fn with_engine(store: Store, engine: EngineHandle) -> Self {
        Self {
            store,
            engine: Some(engine),
        }
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    pub(crate) fn engine(&self) -> Option<&EngineHandle> {
        self.engine.as_ref()
    }

    pub(crate) fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SaveConfig(config) => {
                    if let Err(err) = self.store.save_config(&config) {
                        describer_error!("Failed to save config: {:#}", err);
                    }
                }
                Effect::StartBatch {
                    batch_id,
                    config,
                    links,
                } => match self.engine.as_ref() {
                    Some(engine) => {
                        describer_info!("StartBatch id={} links={}", batch_id, links.len());
                        engine.start_batch(batch_id, config, links);
                    }
                    None => describer_warn!("StartBatch ignored: no engine running"),
                },
                Effect::StopBatch => {
                    if let Some(engine) = self.engine.as_ref() {
                        engine.stop();
                    }
                }
            }
        }
    }
}
