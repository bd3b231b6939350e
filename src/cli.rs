use crate::config::{self, Config};
use crate::llm::openai::OpenAiClient;
use crate::pipeline::{Outcome, Pipeline, Regions};
use crate::query::QueryBuilder;
use crate::render::{html, text, CapturedRegion};
use crate::search::providers::GoogleSearchProvider;
use crate::synth::AnswerSynthesizer;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Web search with an AI-synthesized answer
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
pub struct Cli {
    /// Config file (default: <config dir>/sift/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the results (and answer) to stdout
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Skip the AI answer stage
        #[arg(long)]
        no_ai: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the config file location, creating it if missing
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
}

/// Assemble the pipeline from configuration
pub fn build_pipeline(config: &Config, config_file: &Path, with_answers: bool) -> Arc<Pipeline> {
    let search = Arc::new(GoogleSearchProvider::new(&config.search));

    let synthesizer = (with_answers && config.synthesis.enabled).then(|| {
        let chat = Arc::new(OpenAiClient::new(&config.synthesis));
        Arc::new(AnswerSynthesizer::new(chat, config::prompt_source(config, config_file)))
    });

    Arc::new(Pipeline::new(
        QueryBuilder::new(config.search.excluded_domain.clone()),
        search,
        synthesizer,
    ))
}

/// Parse arguments and dispatch
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_file = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };
    let config = config::load_or_create_config_at(&config_file)?;
    let _log_guard = crate::logging::init(&config, &config_file)?;

    match cli.command {
        None => crate::tui::run(build_pipeline(&config, &config_file, true)).await,
        Some(Command::Config) => {
            println!("{}", config_file.display());
            Ok(())
        }
        Some(Command::Search { query, no_ai, format }) => {
            search_once(&config, &config_file, &query.join(" "), !no_ai, format).await
        }
    }
}

async fn search_once(
    config: &Config,
    config_file: &Path,
    query: &str,
    with_answers: bool,
    format: Format,
) -> Result<()> {
    let pipeline = build_pipeline(config, config_file, with_answers);
    let results = Arc::new(CapturedRegion::new());
    let answer = Arc::new(CapturedRegion::new());
    let regions = Regions {
        results: results.clone(),
        answer: answer.clone(),
    };

    let outcome = pipeline.submit(query).run(&regions).await;
    tracing::debug!(?outcome, "one-shot search finished");

    let results = results.current();
    let answer = answer.current();

    match format {
        Format::Html => print!("{}", html::page(results.as_ref(), answer.as_ref())),
        Format::Text => {
            if let Some(content) = &results {
                println!("{}", text::render(content));
            }
            if let Some(content) = &answer {
                println!("\n--- AI Answer ---\n{}", text::render(content));
            }
        }
    }

    match outcome {
        Outcome::Rejected | Outcome::SearchFailed => {
            anyhow::bail!("search did not complete for {query:?}")
        }
        _ => Ok(()),
    }
}
