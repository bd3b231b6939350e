//! sift library
//!
//! Search the web, show the results, and ask a chat model to answer from them.
//! The terminal UI and the `sift search` command both drive [`pipeline::Pipeline`].

pub mod cli;
pub mod config;
pub mod event;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod query;
pub mod render;
pub mod search;
pub mod synth;
pub mod tui;
