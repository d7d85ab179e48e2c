//! Describer core: pure dialog state machine and view-model helpers.
mod config;
mod effect;
mod link;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::{AiConfig, AiProvider, ConfigField};
pub use effect::Effect;
pub use link::{missing_descriptions, needs_description, LinkId, LinkItem};
pub use msg::Msg;
pub use state::{BatchId, BatchProgress, Confirmation, DialogState, Notice};
pub use update::update;
pub use view_model::{mask_api_key, BatchPanel, DialogViewModel};
