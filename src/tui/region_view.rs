use crate::render::{RegionContent, Tone};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use textwrap::wrap;

/// Scrollable panel showing one output region
pub struct RegionView {
    title: &'static str,
    content: Option<RegionContent>,
    scroll_offset: u16,
    max_scroll: u16,
}

impl RegionView {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            content: None,
            scroll_offset: 0,
            max_scroll: 0,
        }
    }

    pub fn content(&self) -> Option<&RegionContent> {
        self.content.as_ref()
    }

    /// Replace everything shown and jump back to the top
    pub fn set(&mut self, content: RegionContent) {
        self.content = Some(content);
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.content = None;
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title)
            .border_style(Style::default().fg(if focused { Color::White } else { Color::DarkGray }));

        let inner = block.inner(area);
        let lines = match &self.content {
            Some(content) => content_lines(content, inner.width as usize),
            None => Vec::new(),
        };

        self.max_scroll = (lines.len() as u16).saturating_sub(inner.height);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_offset, 0));
        frame.render_widget(paragraph, area);
    }
}

fn wrapped(text: &str, width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    let width = width.saturating_sub(indent.len()).max(10);
    text.lines()
        .flat_map(|line| {
            let pieces = wrap(line, width);
            if pieces.is_empty() {
                vec![Line::from("")]
            } else {
                pieces
                    .into_iter()
                    .map(|piece| Line::from(Span::styled(format!("{indent}{piece}"), style)))
                    .collect()
            }
        })
        .collect()
}

/// Terminal lines for a region's content, wrapped to `width`
pub fn content_lines(content: &RegionContent, width: usize) -> Vec<Line<'static>> {
    match content {
        RegionContent::Message { text, tone } => {
            let style = match tone {
                Tone::Info => Style::default().fg(Color::Gray),
                Tone::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            };
            wrapped(text, width, "", style)
        }
        RegionContent::Results(views) => {
            let mut lines = Vec::new();
            for (idx, view) in views.iter().enumerate() {
                if idx > 0 {
                    lines.push(Line::from(""));
                }
                lines.extend(wrapped(
                    &format!("{}. {}", idx + 1, view.title),
                    width,
                    "",
                    Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
                ));
                lines.extend(wrapped(
                    &view.link,
                    width,
                    "   ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                ));
                if !view.snippet.is_empty() {
                    lines.extend(wrapped(&view.snippet, width, "   ", Style::default().fg(Color::Gray)));
                }
            }
            lines
        }
        RegionContent::Answer(text) => wrapped(text, width, "", Style::default()),
    }
}
