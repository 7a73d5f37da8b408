// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::Path;

/// Default bound for the review identifier allocation loop
pub const DEFAULT_ID_MAX_ATTEMPTS: u32 = 16;

/// Engine configuration loaded from environment variables
/// DOCUMENTATION: Load with Config::from_env() at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development, staging, production
    pub environment: String,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    /// Optional word list replacing the built-in negative-sentiment lexicon
    pub negative_lexicon_path: Option<String>,

    /// Optional word list replacing the built-in profanity lexicon
    pub profanity_lexicon_path: Option<String>,

    /// Upper bound on identifier allocation attempts
    pub id_max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            negative_lexicon_path: None,
            profanity_lexicon_path: None,
            id_max_attempts: DEFAULT_ID_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads .env if present, then the process environment
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            negative_lexicon_path: env::var("NEGATIVE_LEXICON_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),

            profanity_lexicon_path: env::var("PROFANITY_LEXICON_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),

            id_max_attempts: env::var("REVIEW_ID_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_ID_MAX_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(DEFAULT_ID_MAX_ATTEMPTS),
        }
    }

    /// Validate critical configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.id_max_attempts == 0 {
            return Err("REVIEW_ID_MAX_ATTEMPTS must be at least 1".to_string());
        }

        for path in [&self.negative_lexicon_path, &self.profanity_lexicon_path]
            .into_iter()
            .flatten()
        {
            if !Path::new(path).is_file() {
                return Err(format!("Lexicon file not found: {}", path));
            }
        }

        if self.negative_lexicon_path.is_none() || self.profanity_lexicon_path.is_none() {
            log::info!("Using built-in lexicons where no file is configured");
        }

        Ok(())
    }
}
