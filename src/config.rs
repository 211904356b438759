//! Process configuration.
//!
//! Settings are read once at startup (environment variables, with `.env`
//! support) into an immutable [`Config`] value that is passed by reference
//! to every component needing it.

use std::env;
use std::fs;
use std::path::PathBuf;

use snafu::{ensure, ResultExt, Snafu};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant with access to a knowledge base through file search.
When answering questions, use the information from the uploaded documents to provide accurate and relevant answers.
Always cite your sources when using information from the documents.";

/// Errors that make the configuration unusable
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("GEMINI_API_KEY is not set; add it to the environment or a .env file"))]
    MissingApiKey,

    #[snafu(display("invalid value '{value}' for {variable}"))]
    InvalidValue {
        variable: &'static str,
        value: String,
    },

    #[snafu(display("failed to create files directory '{}': {source}", path.display()))]
    CreateFilesDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Bare model name (e.g. "gemini-2.5-flash")
    pub model: String,
    pub system_instruction: String,
    /// When false, requests carry an explicit zero thinking budget
    pub enable_thinking: bool,
    /// Explicit thinking budget; `None` leaves the model default
    pub thinking_budget: Option<i32>,
    /// Directory scanned by the upload command
    pub files_dir: PathBuf,
    /// Directory transcript exports are written to
    pub export_dir: PathBuf,
    /// Prefix for generated store display names
    pub store_prefix: String,
}

impl Config {
    /// Loads settings from the environment (after `.env`) and validates them.
    pub fn load() -> Result<Self, Error> {
        let _ = dotenvy::dotenv();

        let config = Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: var_or("GEMINI_MODEL", DEFAULT_MODEL),
            system_instruction: var_or("GEMINI_SYSTEM_INSTRUCTION", DEFAULT_SYSTEM_INSTRUCTION),
            enable_thinking: parse_bool("GEMINI_ENABLE_THINKING", true)?,
            thinking_budget: parse_budget("GEMINI_THINKING_BUDGET")?,
            files_dir: PathBuf::from(var_or("GEMINI_FILES_DIR", "files")),
            export_dir: PathBuf::from(var_or("GEMINI_EXPORT_DIR", "exports")),
            store_prefix: var_or("GEMINI_STORE_PREFIX", "file-search-chat"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Fails on a missing API key; bootstraps the files directory.
    pub fn validate(&self) -> Result<(), Error> {
        ensure!(!self.api_key.trim().is_empty(), MissingApiKeySnafu);

        if !self.files_dir.exists() {
            fs::create_dir_all(&self.files_dir).context(CreateFilesDirSnafu {
                path: self.files_dir.clone(),
            })?;
        }

        Ok(())
    }
}

fn var_or(variable: &str, default: &str) -> String {
    env::var(variable)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool(variable: &'static str, default: bool) -> Result<bool, Error> {
    match env::var(variable) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => InvalidValueSnafu { variable, value }.fail(),
        },
        Err(_) => Ok(default),
    }
}

fn parse_budget(variable: &'static str) -> Result<Option<i32>, Error> {
    match env::var(variable) {
        Ok(value) if !value.is_empty() => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| Error::InvalidValue { variable, value }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(api_key: &str, files_dir: &Path) -> Config {
        Config {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_instruction: "test instruction".to_string(),
            enable_thinking: true,
            thinking_budget: None,
            files_dir: files_dir.to_path_buf(),
            export_dir: files_dir.join("exports"),
            store_prefix: "test-prefix".to_string(),
        }
    }

    #[test]
    fn validate_rejects_missing_api_key() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            config("", dir.path()).validate(),
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            config("   ", dir.path()).validate(),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn validate_accepts_key_regardless_of_other_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config("test-key", dir.path());
        cfg.model = String::new();
        cfg.store_prefix = String::new();
        cfg.thinking_budget = Some(-1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_creates_missing_files_dir() {
        let dir = tempfile::tempdir().unwrap();
        let files_dir = dir.path().join("files");
        assert!(!files_dir.exists());
        config("test-key", &files_dir).validate().unwrap();
        assert!(files_dir.is_dir());
    }
}
