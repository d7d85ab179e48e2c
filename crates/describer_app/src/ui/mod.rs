pub(crate) mod prompt;
pub(crate) mod render;
