use crate::event::{ChannelRegion, Event, EventResult};
use crate::pipeline::{Outcome, Pipeline, Regions};
use crate::render::{RegionContent, RegionId};
use crate::tui::{InputWidget, RegionView};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Main application state: a search field above the results and answer panels
pub struct App {
    pipeline: Arc<Pipeline>,
    /// Sender handed to every submission's regions
    tx: mpsc::UnboundedSender<Event>,
    pub input: InputWidget,
    results: RegionView,
    answer: RegionView,
    /// Generation of the latest submission; anything older is ignored
    generation: u64,
    is_loading: bool,
    focus: RegionId,
    spinner: usize,
    should_quit: bool,
}

impl App {
    pub fn new(pipeline: Arc<Pipeline>, tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            pipeline,
            tx,
            input: InputWidget::new(),
            results: RegionView::new(" Results "),
            answer: RegionView::new(" AI Answer "),
            generation: 0,
            is_loading: false,
            focus: RegionId::Results,
            spinner: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn region(&self, id: RegionId) -> Option<&RegionContent> {
        match id {
            RegionId::Results => self.results.content(),
            RegionId::Answer => self.answer.content(),
        }
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.focused_mut().scroll_up(3),
                    MouseEventKind::ScrollDown => self.focused_mut().scroll_down(3),
                    _ => {}
                }
                Ok(())
            }
            Event::Tick => {
                if self.is_loading {
                    self.spinner = (self.spinner + 1) % SPINNER.len();
                }
                Ok(())
            }
            Event::Region {
                generation,
                region,
                content,
            } => {
                if generation != self.generation {
                    tracing::debug!(generation, latest = self.generation, "ignoring stale region update");
                    return Ok(());
                }
                match region {
                    RegionId::Results => self.results.set(content),
                    RegionId::Answer => self.answer.set(content),
                }
                Ok(())
            }
            Event::SubmissionDone { generation, outcome } => {
                if generation == self.generation {
                    self.is_loading = false;
                    tracing::debug!(generation, outcome = outcome_name(&outcome), "submission finished");
                }
                Ok(())
            }
            Event::Resize(..) => Ok(()),
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
        }
    }

    fn focused_mut(&mut self) -> &mut RegionView {
        match self.focus {
            RegionId::Results => &mut self.results,
            RegionId::Answer => &mut self.answer,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('u') => {
                    self.input.clear();
                    return Ok(());
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    RegionId::Results => RegionId::Answer,
                    RegionId::Answer => RegionId::Results,
                };
            }
            KeyCode::Up => self.focused_mut().scroll_up(1),
            KeyCode::Down => self.focused_mut().scroll_down(1),
            KeyCode::PageUp => self.focused_mut().scroll_up(10),
            KeyCode::PageDown => self.focused_mut().scroll_down(10),
            _ => self.input.handle_key(key),
        }
        Ok(())
    }

    /// Start a submission for the current input. A running one is not
    /// cancelled; its renders are simply ignored from now on.
    pub fn submit(&mut self) {
        let submission = self.pipeline.submit(self.input.text());
        let generation = submission.generation();
        self.generation = generation;
        self.is_loading = true;
        self.answer.clear();

        let regions = Regions {
            results: Arc::new(ChannelRegion::new(RegionId::Results, generation, self.tx.clone())),
            answer: Arc::new(ChannelRegion::new(RegionId::Answer, generation, self.tx.clone())),
        };
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = submission.run(&regions).await;
            let _ = tx.send(Event::SubmissionDone { generation, outcome });
        });
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search field
                Constraint::Min(5),    // Regions
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        self.input.render(frame, rows[0]);
        self.results.render(frame, panels[0], self.focus == RegionId::Results);
        self.answer.render(frame, panels[1], self.focus == RegionId::Answer);
        self.render_status(frame, rows[2]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = if self.is_loading {
            format!("Working {}", SPINNER[self.spinner])
        } else {
            "Ready".to_string()
        };

        let status = Paragraph::new(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Yellow)),
            Span::raw(state),
            Span::raw(" | "),
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw("=switch panel "),
            Span::styled("↑↓ PgUp PgDn", Style::default().fg(Color::Cyan)),
            Span::raw("=scroll"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status")
                .border_style(Style::default().fg(Color::White)),
        );

        frame.render_widget(status, area);
    }
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Rejected => "rejected",
        Outcome::SearchFailed => "search_failed",
        Outcome::Rendered { .. } => "rendered",
        Outcome::Answered { .. } => "answered",
        Outcome::AnswerFailed { .. } => "answer_failed",
        Outcome::Superseded => "superseded",
    }
}
