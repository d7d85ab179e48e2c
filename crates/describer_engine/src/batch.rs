use std::sync::{mpsc, Mutex};

use describer_core::{
    missing_descriptions, needs_description, AiConfig, BatchId, BatchProgress, LinkItem,
};
use describer_logging::{describer_info, describer_warn};
use tokio_util::sync::CancellationToken;

use crate::{BatchEvent, BatchSummary, DescriptionGenerator, EngineEvent};

pub trait BatchSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

/// Forwards events of one run to the engine channel and keeps its last publish.
pub struct ChannelBatchSink {
    batch_id: BatchId,
    tx: mpsc::Sender<EngineEvent>,
    last_published: Mutex<Option<Vec<LinkItem>>>,
}

impl ChannelBatchSink {
    pub fn new(batch_id: BatchId, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            batch_id,
            tx,
            last_published: Mutex::new(None),
        }
    }

    pub fn take_last_published(&self) -> Option<Vec<LinkItem>> {
        self.last_published
            .lock()
            .map(|mut guard| guard.take())
            .unwrap_or_default()
    }
}

impl BatchSink for ChannelBatchSink {
    fn emit(&self, event: BatchEvent) {
        if let BatchEvent::LinksPublished(links) = &event {
            if let Ok(mut guard) = self.last_published.lock() {
                *guard = Some(links.clone());
            }
        }
        let _ = self.tx.send(EngineEvent {
            batch_id: self.batch_id,
            event,
        });
    }
}

/// Copies descriptions from `newer` into links of `links` that still lack one.
/// Returns whether anything changed.
pub fn merge_descriptions(links: &mut [LinkItem], newer: &[LinkItem]) -> bool {
    let mut changed = false;
    for link in links.iter_mut().filter(|link| needs_description(link)) {
        let filled = newer
            .iter()
            .find(|candidate| candidate.id == link.id && !needs_description(candidate));
        if let Some(filled) = filled {
            link.description = filled.description.clone();
            changed = true;
        }
    }
    changed
}

/// Fills in missing descriptions one link at a time.
///
/// The target set is fixed from `links` on entry. After every successful item
/// the whole working copy is published through `sink`, so partial work survives
/// a stop. `stop` is only checked between items: a call already in flight runs
/// to completion and is still published.
pub async fn run_batch(
    generator: &dyn DescriptionGenerator,
    config: &AiConfig,
    links: Vec<LinkItem>,
    stop: &CancellationToken,
    sink: &dyn BatchSink,
) -> BatchSummary {
    let targets: Vec<LinkItem> = missing_descriptions(&links).into_iter().cloned().collect();
    let total = targets.len();
    let mut working = links;
    let mut summary = BatchSummary::default();

    describer_info!(
        "Batch started targets={} links={} provider={}",
        total,
        working.len(),
        config.provider.id()
    );
    sink.emit(BatchEvent::Started { total });
    sink.emit(BatchEvent::Progress(BatchProgress::new(0, total)));

    for (index, target) in targets.iter().enumerate() {
        if stop.is_cancelled() {
            describer_info!("Batch stopped after {} of {} links", index, total);
            summary.stopped = true;
            break;
        }

        summary.attempted += 1;
        match generator.generate(&target.title, &target.url, config).await {
            Ok(description) => {
                if let Some(slot) = working.iter_mut().find(|link| link.id == target.id) {
                    slot.description = Some(description);
                }
                summary.succeeded += 1;
                describer_info!("Link {} described ({}/{})", target.id, index + 1, total);
                sink.emit(BatchEvent::LinksPublished(working.clone()));
            }
            Err(error) => {
                describer_warn!("Link {} failed: {}", target.id, error);
                sink.emit(BatchEvent::ItemFailed {
                    id: target.id,
                    error: error.clone(),
                });
                summary.failed.push((target.id, error));
            }
        }

        sink.emit(BatchEvent::Progress(BatchProgress::new(index + 1, total)));
    }

    describer_info!(
        "Batch finished attempted={} succeeded={} failed={} stopped={}",
        summary.attempted,
        summary.succeeded,
        summary.failed.len(),
        summary.stopped
    );
    sink.emit(BatchEvent::Finished(summary.clone()));
    summary
}
