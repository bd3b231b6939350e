use crate::pipeline::Outcome;
use crate::render::{OutputRegion, RegionContent, RegionId};
use crossterm::event::{KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal mouse event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event for periodic updates (spinner)
    Tick,
    /// A submission rendered something into one of the regions
    Region {
        generation: u64,
        region: RegionId,
        content: RegionContent,
    },
    /// A submission's chain finished
    SubmissionDone { generation: u64, outcome: Outcome },
    /// Request to quit the application
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;

/// Region that forwards writes to the UI loop as [`Event::Region`]
pub struct ChannelRegion {
    region: RegionId,
    generation: u64,
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelRegion {
    pub fn new(region: RegionId, generation: u64, tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { region, generation, tx }
    }
}

impl OutputRegion for ChannelRegion {
    fn replace(&self, content: RegionContent) {
        // The UI may already be gone while a chain is still finishing.
        let _ = self.tx.send(Event::Region {
            generation: self.generation,
            region: self.region,
            content,
        });
    }
}
