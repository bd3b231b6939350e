pub mod settings;

pub use settings::{Config, DebugLogRotation, SearchSettings, SynthesisSettings};

use crate::prompt::PromptSource;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Template written next to a freshly created config file
pub const DEFAULT_PROMPT: &str = include_str!("../../prompts/answer.yaml");

/// Get the default configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("sift");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&config_dir)
        .context("Failed to create config directory")?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from `path`, writing a default file there if it doesn't exist
pub fn load_or_create_config_at(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    } else {
        let config = Config::default();
        save_config_at(&config, path)?;
        write_default_prompt(&config, path)?;

        eprintln!("Created default config at: {}", path.display());
        eprintln!("Please edit this file to add your search and OpenAI credentials.");

        Ok(config)
    }
}

/// Where the answer prompt lives; relative paths are read from the config file's directory
pub fn prompt_source(config: &Config, config_file: &Path) -> PromptSource {
    let base_dir = config_file.parent().unwrap_or_else(|| Path::new("."));
    PromptSource::parse(&config.synthesis.prompt).relative_to(base_dir)
}

fn write_default_prompt(config: &Config, config_file: &Path) -> Result<()> {
    let PromptSource::File(path) = prompt_source(config, config_file) else {
        return Ok(());
    };
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create prompt directory: {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_PROMPT)
        .with_context(|| format!("Failed to write prompt template: {}", path.display()))?;
    Ok(())
}

/// Save configuration to `path`
pub fn save_config_at(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_or_create_config_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.search.excluded_domain, "amazon.com");

        let again = load_or_create_config_at(&path).unwrap();
        assert_eq!(again.synthesis.model, config.synthesis.model);
    }

    #[test]
    fn test_default_prompt_lives_beside_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.toml");

        let config = load_or_create_config_at(&config_file).unwrap();
        let source = prompt_source(&config, &config_file);

        let expected = dir.path().join("prompts").join("answer.yaml");
        assert_eq!(source, PromptSource::File(expected.clone()));
        assert!(expected.starts_with(dir.path()));

        let text = fs::read_to_string(&expected).unwrap();
        assert_eq!(text, DEFAULT_PROMPT);
        assert!(crate::prompt::PromptTemplate::parse(&text).is_ok());
    }

    #[test]
    fn test_existing_prompt_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = dir.path().join("prompts").join("answer.yaml");
        fs::create_dir_all(prompt.parent().unwrap()).unwrap();
        fs::write(&prompt, "system: mine\nuser: mine\n").unwrap();

        load_or_create_config_at(&dir.path().join("config.toml")).unwrap();
        assert_eq!(fs::read_to_string(&prompt).unwrap(), "system: mine\nuser: mine\n");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search = [").unwrap();

        let err = load_or_create_config_at(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
