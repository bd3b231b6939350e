use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_textarea::TextArea;

/// Single-line search field wrapper around tui-textarea
pub struct InputWidget {
    textarea: TextArea<'static>,
}

impl InputWidget {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Span::styled(
                    " 🔍 Search (Enter=search │ Ctrl+U=clear │ Ctrl+C=quit) ",
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        textarea.set_placeholder_text("Type a search term");
        textarea.set_cursor_line_style(Style::default());

        Self { textarea }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.textarea.input(key);
    }

    /// Current contents; the field keeps its text after a search, like a form
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

impl Default for InputWidget {
    fn default() -> Self {
        Self::new()
    }
}
