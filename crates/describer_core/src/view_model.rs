use crate::{AiProvider, Confirmation, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogViewModel {
    pub open: bool,
    pub provider: AiProvider,
    pub api_key_masked: String,
    /// Only present for providers that take a base URL.
    pub base_url: Option<String>,
    pub model: String,
    pub panel: BatchPanel,
    pub notice: Option<Notice>,
    pub confirmation: Option<Confirmation>,
    pub link_count: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPanel {
    Idle {
        missing: usize,
    },
    Processing {
        current: usize,
        total: usize,
        percent: u8,
    },
}

/// Masks all but the last four characters of a key. Short keys are fully masked.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
