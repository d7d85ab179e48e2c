use crate::{AiConfig, BatchId, LinkItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the committed draft to the owner.
    SaveConfig(AiConfig),
    /// Run a batch over a snapshot of the owner's links.
    StartBatch {
        batch_id: BatchId,
        config: AiConfig,
        links: Vec<LinkItem>,
    },
    /// Raise the stop signal of the running batch.
    StopBatch,
}
