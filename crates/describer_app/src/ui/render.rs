use describer_core::{needs_description, BatchPanel, DialogViewModel, LinkItem};

const BAR_WIDTH: usize = 30;

/// Config panel plus either the progress or the idle line.
pub(crate) fn render(view: &DialogViewModel) -> Vec<String> {
    let mut lines = render_config(view);
    lines.push(render_panel(view.panel));
    if let Some(notice) = view.notice {
        lines.push(format!("! {}", notice.message()));
    }
    lines
}

pub(crate) fn render_config(view: &DialogViewModel) -> Vec<String> {
    let mut lines = vec![format!("Provider: {}", view.provider)];
    let key = if view.api_key_masked.is_empty() {
        "(not set)"
    } else {
        view.api_key_masked.as_str()
    };
    lines.push(format!("API key:  {key}"));
    if let Some(base_url) = &view.base_url {
        lines.push(format!("Base URL: {}", or_default(base_url)));
    }
    lines.push(format!("Model:    {}", or_default(&view.model)));
    lines
}

pub(crate) fn render_panel(panel: BatchPanel) -> String {
    match panel {
        BatchPanel::Idle { missing: 0 } => "All links have a description.".to_string(),
        BatchPanel::Idle { missing } => {
            format!("{missing} link(s) without a description. Run `describer generate`.")
        }
        BatchPanel::Processing {
            current,
            total,
            percent,
        } => format!(
            "[{}] {current}/{total} ({percent}%)  type s + Enter to stop",
            progress_bar(percent, BAR_WIDTH)
        ),
    }
}

pub(crate) fn render_links(links: &[LinkItem]) -> Vec<String> {
    links
        .iter()
        .map(|link| {
            let description = if needs_description(link) {
                "-".to_string()
            } else {
                link.description.clone().unwrap_or_default()
            };
            format!("{:>4}  {}  <{}>\n      {}", link.id, link.title, link.url, description)
        })
        .collect()
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn or_default(value: &str) -> &str {
    if value.trim().is_empty() {
        "(provider default)"
    } else {
        value
    }
}
