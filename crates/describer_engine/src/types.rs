use std::fmt;

use describer_core::{BatchId, BatchProgress, LinkId, LinkItem, Msg};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started { total: usize },
    Progress(BatchProgress),
    /// Full working copy after a successful item.
    LinksPublished(Vec<LinkItem>),
    ItemFailed { id: LinkId, error: GenerateError },
    Finished(BatchSummary),
    /// The run died without finishing (task panic).
    Aborted { reason: String },
}

/// A [`BatchEvent`] tagged with the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub batch_id: BatchId,
    pub event: BatchEvent,
}

impl EngineEvent {
    /// Core message for this event, if the dialog cares about it.
    pub fn into_msg(self) -> Option<Msg> {
        let batch_id = self.batch_id;
        match self.event {
            BatchEvent::Progress(progress) => Some(Msg::BatchProgressed { batch_id, progress }),
            BatchEvent::LinksPublished(links) => Some(Msg::LinksPublished { batch_id, links }),
            BatchEvent::Finished(_) | BatchEvent::Aborted { .. } => {
                Some(Msg::BatchFinished { batch_id })
            }
            BatchEvent::Started { .. } | BatchEvent::ItemFailed { .. } => None,
        }
    }

    /// True for the last event a run emits.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.event,
            BatchEvent::Finished(_) | BatchEvent::Aborted { .. }
        )
    }
}

/// The engine thread is gone; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("engine thread stopped")]
pub struct EngineDisconnected;

/// Diagnostic tally of one run. Stopping early is not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<(LinkId, GenerateError)>,
    pub stopped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingApiKey,
    InvalidBaseUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    EmptyResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingApiKey => write!(f, "missing api key"),
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::EmptyResponse => write!(f, "empty response"),
        }
    }
}
