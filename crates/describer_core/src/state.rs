use crate::view_model::{mask_api_key, BatchPanel, DialogViewModel};
use crate::{missing_descriptions, AiConfig, ConfigField, LinkItem};

/// Identifies one batch run; runner events carry it back.
pub type BatchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// Whole percent, rounded down. Zero when there is nothing to do.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.current.min(self.total) * 100 / self.total;
        pct as u8
    }
}

/// Blocking notice shown instead of starting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingApiKey,
    NothingToGenerate,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::MissingApiKey => "Please configure an API key first.",
            Notice::NothingToGenerate => "All links already have a description.",
        }
    }
}

/// Pending question before a batch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub count: usize,
}

impl Confirmation {
    pub fn prompt(&self) -> String {
        format!(
            "Generate descriptions for {} link(s) without one? Requests are sent one at a time.",
            self.count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogState {
    open: bool,
    saved_config: AiConfig,
    draft: AiConfig,
    links: Vec<LinkItem>,
    progress: BatchProgress,
    processing: bool,
    /// Run whose events are applied; kept after stop so its in-flight item still lands.
    batch_id: Option<BatchId>,
    last_batch_id: BatchId,
    notice: Option<Notice>,
    confirmation: Option<Confirmation>,
    dirty: bool,
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(config: AiConfig, links: Vec<LinkItem>) -> Self {
        Self {
            draft: config.clone(),
            saved_config: config,
            links,
            ..Self::default()
        }
    }

    pub fn view(&self) -> DialogViewModel {
        let panel = if self.processing {
            BatchPanel::Processing {
                current: self.progress.current,
                total: self.progress.total,
                percent: self.progress.percent(),
            }
        } else {
            BatchPanel::Idle {
                missing: missing_descriptions(&self.links).len(),
            }
        };

        DialogViewModel {
            open: self.open,
            provider: self.draft.provider,
            api_key_masked: mask_api_key(&self.draft.api_key),
            base_url: self
                .draft
                .provider
                .uses_base_url()
                .then(|| self.draft.base_url.clone()),
            model: self.draft.model.clone(),
            panel,
            notice: self.notice,
            confirmation: self.confirmation,
            link_count: self.links.len(),
            dirty: self.dirty,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn draft(&self) -> &AiConfig {
        &self.draft
    }

    pub fn saved_config(&self) -> &AiConfig {
        &self.saved_config
    }

    pub fn links(&self) -> &[LinkItem] {
        &self.links
    }

    pub fn current_batch(&self) -> Option<BatchId> {
        self.batch_id
    }

    pub(crate) fn is_current_batch(&self, batch_id: BatchId) -> bool {
        self.batch_id == Some(batch_id)
    }

    pub fn progress(&self) -> BatchProgress {
        self.progress
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn confirmation(&self) -> Option<Confirmation> {
        self.confirmation
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn open(&mut self) {
        self.open = true;
        self.draft = self.saved_config.clone();
        self.progress = BatchProgress::default();
        self.notice = None;
        self.confirmation = None;
        self.mark_dirty();
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
        self.draft = self.saved_config.clone();
        self.notice = None;
        self.confirmation = None;
        self.mark_dirty();
    }

    pub(crate) fn set_field(&mut self, field: ConfigField) {
        self.draft = std::mem::take(&mut self.draft).with_field(field);
        self.mark_dirty();
    }

    /// Commits the draft as the saved config and returns it.
    pub(crate) fn commit_draft(&mut self) -> AiConfig {
        self.saved_config = self.draft.clone();
        self.saved_config.clone()
    }

    pub(crate) fn load_config(&mut self, config: AiConfig) {
        if !self.open {
            self.draft = config.clone();
        }
        self.saved_config = config;
        self.mark_dirty();
    }

    pub(crate) fn replace_links(&mut self, links: Vec<LinkItem>) {
        self.links = links;
        self.mark_dirty();
    }

    pub(crate) fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.confirmation = None;
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn ask_confirmation(&mut self, count: usize) {
        self.confirmation = Some(Confirmation { count });
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn take_confirmation(&mut self) -> Option<Confirmation> {
        let taken = self.confirmation.take();
        if taken.is_some() {
            self.mark_dirty();
        }
        taken
    }

    pub(crate) fn begin_batch(&mut self, total: usize) -> BatchId {
        self.last_batch_id += 1;
        self.batch_id = Some(self.last_batch_id);
        self.processing = true;
        self.progress = BatchProgress::new(0, total);
        self.mark_dirty();
        self.last_batch_id
    }

    pub(crate) fn set_progress(&mut self, progress: BatchProgress) {
        self.progress = progress;
        self.mark_dirty();
    }

    pub(crate) fn end_processing(&mut self) {
        if self.processing {
            self.processing = false;
            self.mark_dirty();
        }
    }
}
