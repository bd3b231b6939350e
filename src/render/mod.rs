//! View models for the two output regions and the sinks that display them.
//!
//! Components never build markup themselves: they produce a [`RegionContent`]
//! and hand it to an [`OutputRegion`]. The boundaries in [`html`], [`text`] and
//! `tui::region_view` decide how it looks and take care of escaping.

pub mod html;
pub mod text;

use crate::search::SearchItem;
use std::sync::Mutex;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error fetching results. Try again later.";
pub const GENERATING_MESSAGE: &str = "Generating AI answer...";
pub const ANSWER_FAILED_MESSAGE: &str = "Error generating AI answer. Try again later.";
pub const NO_AI_RESPONSE: &str = "No response from AI.";

/// The two areas of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Results,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

/// One search hit as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl From<&SearchItem> for ResultView {
    fn from(item: &SearchItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            snippet: item.snippet.clone().unwrap_or_default(),
        }
    }
}

/// Everything a region can show. Each value replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Message { text: String, tone: Tone },
    Results(Vec<ResultView>),
    Answer(String),
}

impl RegionContent {
    pub fn info(text: impl Into<String>) -> Self {
        Self::Message {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Message {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    pub fn empty_query() -> Self {
        Self::info(EMPTY_QUERY_MESSAGE)
    }

    pub fn searching(query: &str, excluded_domain: &str) -> Self {
        Self::info(format!(
            "Searching for \"{}\" (excluding {})...",
            query, excluded_domain
        ))
    }

    /// Result list for `items`, or the "no results" message when empty
    pub fn results(items: &[SearchItem], query: &str) -> Self {
        if items.is_empty() {
            return Self::info(format!("No results found for \"{}\".", query));
        }
        Self::Results(items.iter().map(ResultView::from).collect())
    }

    pub fn search_failed() -> Self {
        Self::error(SEARCH_FAILED_MESSAGE)
    }

    pub fn generating() -> Self {
        Self::info(GENERATING_MESSAGE)
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer(text.into())
    }

    pub fn answer_failed() -> Self {
        Self::error(ANSWER_FAILED_MESSAGE)
    }
}

/// A place rendered content goes. Replacing is wholesale: last writer wins.
pub trait OutputRegion: Send + Sync {
    fn replace(&self, content: RegionContent);
}

/// In-memory region that remembers everything written to it
#[derive(Debug, Default)]
pub struct CapturedRegion {
    history: Mutex<Vec<RegionContent>>,
}

impl CapturedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the region currently shows
    pub fn current(&self) -> Option<RegionContent> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Every write, oldest first
    pub fn history(&self) -> Vec<RegionContent> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl OutputRegion for CapturedRegion {
    fn replace(&self, content: RegionContent) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(content);
    }
}
