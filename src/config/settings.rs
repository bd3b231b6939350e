use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file (or directory) override; defaults next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    /// How debug log files are rotated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    /// Web search credentials and query shaping
    #[serde(default)]
    pub search: SearchSettings,

    /// Chat-completion answer synthesis
    #[serde(default)]
    pub synthesis: SynthesisSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
            search: SearchSettings::default(),
            synthesis: SynthesisSettings::default(),
        }
    }
}

/// Google Custom Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// API key
    pub api_key: String,

    /// Programmable search engine id (`cx`)
    pub cse_id: String,

    /// Endpoint of the Custom Search JSON API
    #[serde(default = "default_search_api_base")]
    pub api_base: String,

    /// Domain removed from every query with `-site:`
    #[serde(default = "default_excluded_domain")]
    pub excluded_domain: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: "YOUR_GOOGLE_API_KEY".to_string(),
            cse_id: "YOUR_SEARCH_ENGINE_ID".to_string(),
            api_base: default_search_api_base(),
            excluded_domain: default_excluded_domain(),
        }
    }
}

/// OpenAI-compatible chat completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// Run the answer stage after every successful search
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bearer token
    pub api_key: String,

    /// Base URL; `/v1/chat/completions` is appended
    #[serde(default = "default_chat_api_base")]
    pub api_base: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Prompt template location: an http(s) URL, or a file path (relative to the config file)
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: "YOUR_OPENAI_API_KEY".to_string(),
            api_base: default_chat_api_base(),
            model: default_model(),
            prompt: default_prompt(),
        }
    }
}

/// Debug log rotation strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Single file, appended forever
    None,
    /// One file per day
    Daily,
    /// One file per process run
    Session,
}

fn default_true() -> bool {
    true
}

fn default_search_api_base() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_excluded_domain() -> String {
    "amazon.com".to_string()
}

fn default_chat_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_prompt() -> String {
    "prompts/answer.yaml".to_string()
}
