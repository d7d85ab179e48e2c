pub type LinkId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

impl LinkItem {
    pub fn new(id: LinkId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A blank description counts as missing.
pub fn needs_description(link: &LinkItem) -> bool {
    link.description
        .as_deref()
        .map_or(true, |text| text.trim().is_empty())
}

/// Links lacking a description, in collection order.
pub fn missing_descriptions(links: &[LinkItem]) -> Vec<&LinkItem> {
    links.iter().filter(|link| needs_description(link)).collect()
}
