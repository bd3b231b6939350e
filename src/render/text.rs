//! Plain-text boundary used by `sift search`.

use super::{RegionContent, Tone};

pub fn render(content: &RegionContent) -> String {
    match content {
        RegionContent::Message { text, tone: Tone::Info } => text.clone(),
        RegionContent::Message { text, tone: Tone::Error } => format!("error: {}", text),
        RegionContent::Results(views) => views
            .iter()
            .enumerate()
            .map(|(idx, view)| {
                let mut block = format!("{}. {}\n   {}", idx + 1, view.title, view.link);
                if !view.snippet.is_empty() {
                    block.push_str("\n   ");
                    block.push_str(&view.snippet);
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        RegionContent::Answer(text) => text.clone(),
    }
}
