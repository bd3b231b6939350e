//! Shared fakes and fixtures for pipeline tests
#![allow(dead_code)]

use sift::llm::types::ChatMessage;
use sift::llm::{ChatError, ChatProvider};
use sift::pipeline::Regions;
use sift::prompt::PromptSource;
use sift::query::SearchQuery;
use sift::render::CapturedRegion;
use sift::search::{SearchError, SearchItem, SearchProvider};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// `n` distinct items T1..Tn in order
pub fn items(n: usize) -> Vec<SearchItem> {
    (1..=n)
        .map(|i| {
            SearchItem::new(
                format!("T{i}"),
                format!("https://site{i}.example/page"),
                Some(format!("Snippet {i}")),
            )
        })
        .collect()
}

/// Search provider returning a fixed answer and recording queries
pub struct StubSearch {
    result: Result<Vec<SearchItem>, String>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl StubSearch {
    pub fn with_items(items: Vec<SearchItem>) -> Self {
        Self {
            result: Ok(items),
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            ..Self::with_items(Vec::new())
        }
    }

    /// The first call blocks until `gate` fires
    pub fn gated(self, gate: oneshot::Receiver<()>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.final_query().to_string());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.result.clone().map_err(SearchError::Api)
    }
}

/// What the stub chat model does when called
pub enum ChatReply {
    Text(String),
    Empty,
    Fail(String),
}

pub struct StubChat {
    reply: ChatReply,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubChat {
    pub fn new(reply: ChatReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(ChatReply::Text(text.to_string()))
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatProvider for StubChat {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, ChatError> {
        self.requests.lock().unwrap().push(messages);
        match &self.reply {
            ChatReply::Text(text) => Ok(Some(text.clone())),
            ChatReply::Empty => Ok(None),
            ChatReply::Fail(message) => Err(ChatError::Api(message.clone())),
        }
    }
}

/// Two captured regions plus the `Regions` handle pointing at them
pub struct CapturedRegions {
    pub results: Arc<CapturedRegion>,
    pub answer: Arc<CapturedRegion>,
    pub regions: Regions,
}

pub fn captured_regions() -> CapturedRegions {
    let results = Arc::new(CapturedRegion::new());
    let answer = Arc::new(CapturedRegion::new());
    CapturedRegions {
        regions: Regions {
            results: results.clone(),
            answer: answer.clone(),
        },
        results,
        answer,
    }
}

/// Temporary directory holding a prompt template
pub struct PromptFixture {
    pub temp_dir: TempDir,
}

impl PromptFixture {
    pub fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("answer.yaml"), contents).expect("Failed to write prompt");
        Self { temp_dir }
    }

    pub fn standard() -> Self {
        Self::new("system: You answer from search results.\nuser: Summarize the findings.\n")
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("answer.yaml")
    }

    pub fn source(&self) -> PromptSource {
        PromptSource::File(self.path())
    }
}

/// Base URL of a local port nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{addr}")
}
