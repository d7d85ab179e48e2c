use crate::{AiConfig, BatchId, BatchProgress, ConfigField, LinkItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Owner opened the dialog.
    DialogOpened,
    /// User closed the dialog without saving.
    CancelClicked,
    /// User edited one field of the draft.
    FieldEdited(ConfigField),
    /// User clicked Save.
    SaveClicked,
    /// User asked to fill in missing descriptions.
    GenerateClicked,
    /// User accepted the confirmation prompt.
    GenerateConfirmed,
    /// User rejected the confirmation prompt.
    GenerateDeclined,
    /// User acknowledged the current notice.
    NoticeDismissed,
    /// User clicked Stop while a batch is running.
    StopClicked,
    /// Runner advanced.
    BatchProgressed {
        batch_id: BatchId,
        progress: BatchProgress,
    },
    /// Runner published its working copy.
    LinksPublished {
        batch_id: BatchId,
        links: Vec<LinkItem>,
    },
    /// Runner loop ended (exhausted, stopped or all failed).
    BatchFinished { batch_id: BatchId },
    /// Owner replaced its link collection.
    LinksReplaced(Vec<LinkItem>),
    /// Owner replaced its saved configuration.
    ConfigLoaded(AiConfig),
    /// Render tick.
    Tick,
    NoOp,
}
