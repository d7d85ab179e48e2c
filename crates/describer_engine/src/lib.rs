//! Describer engine: batch runner, description generators and effect execution.
mod batch;
mod engine;
mod generator;
mod persist;
mod prompt;
mod types;

pub use batch::{merge_descriptions, run_batch, BatchSink, ChannelBatchSink};
pub use engine::EngineHandle;
pub use generator::{
    DescriptionGenerator, GeneratorSettings, HttpDescriptionGenerator, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
pub use persist::{AtomicFileWriter, PersistError};
pub use prompt::{build_prompt, clean_description, SYSTEM_PROMPT};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    BatchEvent, BatchSummary, EngineDisconnected, EngineEvent, FailureKind, GenerateError,
};
