//! HTML boundary. Every field that came from the network or the user is escaped.

use super::{RegionContent, ResultView, Tone};
use html_escape::{encode_double_quoted_attribute, encode_text};

fn tone_classes(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "text-gray-600",
        Tone::Error => "text-red-600",
    }
}

fn result_block(view: &ResultView) -> String {
    format!(
        "<div class=\"p-4 border-b border-gray-200\">\n  \
         <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"text-blue-600 font-medium hover:underline\">{}</a>\n  \
         <p class=\"text-gray-600 mt-1\">{}</p>\n\
         </div>",
        encode_double_quoted_attribute(&view.link),
        encode_text(&view.title),
        encode_text(&view.snippet)
    )
}

/// Markup for one region's content
pub fn render(content: &RegionContent) -> String {
    match content {
        RegionContent::Message { text, tone } => {
            format!("<p class=\"{}\">{}</p>", tone_classes(*tone), encode_text(text))
        }
        RegionContent::Results(views) => views
            .iter()
            .map(result_block)
            .collect::<Vec<_>>()
            .join("\n"),
        RegionContent::Answer(text) => format!(
            "<div class=\"whitespace-pre-wrap text-gray-800\">{}</div>",
            encode_text(text)
        ),
    }
}

/// A standalone page showing both regions
pub fn page(results: Option<&RegionContent>, answer: Option<&RegionContent>) -> String {
    let section = |id: &str, content: Option<&RegionContent>| {
        format!(
            "<section id=\"{}\">\n{}\n</section>",
            id,
            content.map(render).unwrap_or_default()
        )
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>sift</title></head>\n<body>\n{}\n{}\n</body>\n</html>\n",
        section("results", results),
        section("ai-answer", answer)
    )
}
