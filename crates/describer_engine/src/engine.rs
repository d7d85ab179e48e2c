use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use describer_core::{AiConfig, BatchId, LinkItem};
use describer_logging::{describer_error, describer_info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::batch::{merge_descriptions, run_batch, BatchSink, ChannelBatchSink};
use crate::generator::{DescriptionGenerator, GeneratorSettings, HttpDescriptionGenerator};
use crate::{BatchEvent, EngineDisconnected, EngineEvent};

enum EngineCommand {
    StartBatch {
        batch_id: BatchId,
        config: AiConfig,
        links: Vec<LinkItem>,
    },
    Stop,
}

struct RunningBatch {
    stop: CancellationToken,
    /// Resolves to the run's last published collection.
    task: JoinHandle<Option<Vec<LinkItem>>>,
}

/// Owns a background thread with a tokio runtime that executes batches.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self::with_generator(Arc::new(HttpDescriptionGenerator::new(settings)))
    }

    pub fn with_generator(generator: Arc<dyn DescriptionGenerator>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut running: Option<RunningBatch> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartBatch {
                        batch_id,
                        config,
                        links,
                    } => {
                        let previous = running.take();
                        let stop = CancellationToken::new();
                        let task = runtime.spawn(run_after(
                            previous,
                            generator.clone(),
                            batch_id,
                            config,
                            links,
                            stop.clone(),
                            event_tx.clone(),
                        ));
                        running = Some(RunningBatch { stop, task });
                    }
                    EngineCommand::Stop => {
                        if let Some(batch) = running.as_ref() {
                            describer_info!("Stop requested");
                            batch.stop.cancel();
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_batch(&self, batch_id: BatchId, config: AiConfig, links: Vec<LinkItem>) {
        let _ = self.cmd_tx.send(EngineCommand::StartBatch {
            batch_id,
            config,
            links,
        });
    }

    pub fn stop(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Stop);
    }

    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineDisconnected> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(EngineDisconnected),
        }
    }

    /// `Ok(None)` on timeout.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<EngineEvent>, EngineDisconnected> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineDisconnected),
        }
    }
}

/// Runs one batch once the previous run, if any, has unwound.
///
/// Work the previous run published after the new snapshot was taken is merged
/// in first, so a restart never regenerates or overwrites it.
async fn run_after(
    previous: Option<RunningBatch>,
    generator: Arc<dyn DescriptionGenerator>,
    batch_id: BatchId,
    config: AiConfig,
    mut links: Vec<LinkItem>,
    stop: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) -> Option<Vec<LinkItem>> {
    let mut carried = None;
    if let Some(previous) = previous {
        previous.stop.cancel();
        carried = previous.task.await.ok().flatten();
    }

    let sink = Arc::new(ChannelBatchSink::new(batch_id, event_tx));
    if let Some(newer) = carried.as_deref() {
        if merge_descriptions(&mut links, newer) {
            describer_info!("Batch {} seeded with work from the previous run", batch_id);
            sink.emit(BatchEvent::LinksPublished(links.clone()));
        }
    }

    let run_sink = sink.clone();
    let seed = links.clone();
    let inner = tokio::spawn(async move {
        run_batch(generator.as_ref(), &config, links, &stop, run_sink.as_ref()).await;
    });

    if let Err(err) = inner.await {
        describer_error!("Batch {} aborted: {}", batch_id, err);
        sink.emit(BatchEvent::Aborted {
            reason: err.to_string(),
        });
    }

    // Nothing published means the seed (possibly merged) is the latest known state.
    sink.take_last_published().or(Some(seed))
}
