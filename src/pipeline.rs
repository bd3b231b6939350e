//! The submission handler: query → search → results → (optional) answer.
//!
//! Every submission takes a new generation number. Writes from a chain whose
//! generation is no longer the latest are dropped, so an old, slow search can
//! never overwrite what a newer one rendered. In-flight requests of a stale
//! chain are not cancelled.

use crate::query::{QueryBuilder, QueryError, SearchQuery};
use crate::render::{OutputRegion, RegionContent};
use crate::search::{SearchItem, SearchProvider};
use crate::synth::AnswerSynthesizer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, monotonically increasing submission counter
#[derive(Debug, Clone, Default)]
pub struct Generations(Arc<AtomicU64>);

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, making every earlier ticket stale
    pub fn next(&self) -> Ticket {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            id,
            counter: self.0.clone(),
        }
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    counter: Arc<AtomicU64>,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.id
    }
}

/// Region wrapper that ignores writes once its ticket is stale
struct GuardedRegion<'a> {
    ticket: &'a Ticket,
    inner: &'a dyn OutputRegion,
}

impl OutputRegion for GuardedRegion<'_> {
    fn replace(&self, content: RegionContent) {
        if self.ticket.is_current() {
            self.inner.replace(content);
        } else {
            tracing::debug!(generation = self.ticket.id(), "dropping render from stale submission");
        }
    }
}

/// Handles to the two output regions
#[derive(Clone)]
pub struct Regions {
    pub results: Arc<dyn OutputRegion>,
    pub answer: Arc<dyn OutputRegion>,
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Empty input; nothing was sent
    Rejected,
    /// The search call failed; the answer stage never ran
    SearchFailed,
    /// Results shown; no answer stage configured
    Rendered { items: Vec<SearchItem> },
    /// Results and answer shown
    Answered { items: Vec<SearchItem> },
    /// Results shown; the answer stage failed
    AnswerFailed { items: Vec<SearchItem> },
    /// A newer submission started before the search finished
    Superseded,
}

pub struct Pipeline {
    builder: QueryBuilder,
    search: Arc<dyn SearchProvider>,
    synthesizer: Option<Arc<AnswerSynthesizer>>,
    generations: Generations,
}

impl Pipeline {
    pub fn new(
        builder: QueryBuilder,
        search: Arc<dyn SearchProvider>,
        synthesizer: Option<Arc<AnswerSynthesizer>>,
    ) -> Self {
        Self {
            builder,
            search,
            synthesizer,
            generations: Generations::new(),
        }
    }

    pub fn generations(&self) -> &Generations {
        &self.generations
    }

    /// Whether the answer stage runs after a successful search
    pub fn answers_enabled(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Begin a submission. The generation is taken now, so a later `submit`
    /// supersedes this one even if it is run first.
    pub fn submit(self: &Arc<Self>, raw: impl Into<String>) -> Submission {
        Submission {
            pipeline: self.clone(),
            raw: raw.into(),
            ticket: self.generations.next(),
        }
    }
}

/// One user action, ready to run
pub struct Submission {
    pipeline: Arc<Pipeline>,
    raw: String,
    ticket: Ticket,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.ticket.id()
    }

    pub async fn run(self, regions: &Regions) -> Outcome {
        let results = GuardedRegion {
            ticket: &self.ticket,
            inner: regions.results.as_ref(),
        };

        let query = match self.pipeline.builder.build(&self.raw) {
            Ok(query) => query,
            Err(QueryError::Empty) => {
                results.replace(RegionContent::empty_query());
                return Outcome::Rejected;
            }
        };

        results.replace(RegionContent::searching(
            query.original(),
            self.pipeline.builder.excluded_domain(),
        ));

        let items = match self.search(&query).await {
            Some(items) => items,
            None if !self.ticket.is_current() => {
                tracing::debug!(generation = self.ticket.id(), "superseded submission's search failed");
                return Outcome::Superseded;
            }
            None => {
                results.replace(RegionContent::search_failed());
                return Outcome::SearchFailed;
            }
        };

        if !self.ticket.is_current() {
            tracing::debug!(generation = self.ticket.id(), "submission superseded after search");
            return Outcome::Superseded;
        }

        results.replace(RegionContent::results(&items, query.original()));

        let Some(synthesizer) = self.pipeline.synthesizer.clone() else {
            return Outcome::Rendered { items };
        };

        let answer = GuardedRegion {
            ticket: &self.ticket,
            inner: regions.answer.as_ref(),
        };

        match synthesizer.run(query.original(), &items, &answer).await {
            Ok(()) => Outcome::Answered { items },
            Err(_) => Outcome::AnswerFailed { items },
        }
    }

    async fn search(&self, query: &SearchQuery) -> Option<Vec<SearchItem>> {
        match self.pipeline.search.search(query).await {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(
                    generation = self.ticket.id(),
                    error = %crate::logging::redact_secrets(&e.to_string()),
                    "search failed"
                );
                None
            }
        }
    }
}
