pub mod app;
pub mod input;
pub mod region_view;

pub use app::App;
pub use input::InputWidget;
pub use region_view::RegionView;

use crate::event::Event;
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event as TermEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the interactive search UI until the user quits
pub async fn run(pipeline: Arc<Pipeline>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, pipeline).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(terminal: &mut Term, pipeline: Arc<Pipeline>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(pipeline, tx);
    let mut term_events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(150));

    tracing::info!("terminal ui started");

    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        let event = tokio::select! {
            maybe = term_events.next() => match maybe {
                Some(Ok(TermEvent::Key(key))) => Event::Key(key),
                Some(Ok(TermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                Some(Ok(TermEvent::Resize(w, h))) => Event::Resize(w, h),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => Event::Quit,
            },
            Some(event) = rx.recv() => event,
            _ = tick.tick() => Event::Tick,
        };

        app.handle_event(event)?;
    }

    tracing::info!("terminal ui stopped");
    Ok(())
}
