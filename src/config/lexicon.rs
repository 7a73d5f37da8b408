// src/config/lexicon.rs
// DOCUMENTATION: Word lists used by the content policies
// PURPOSE: Built-in defaults plus loading replacement lists from files

use crate::config::Config;
use crate::errors::ReviewError;
use crate::services::text_normalizer::normalize;
use std::fs;

/// Words that count as a concrete negative aspect (policy P1)
const DEFAULT_NEGATIVE_WORDS: &[&str] = &[
    "mal",
    "deficiente",
    "sucio",
    "inadecuado",
    "cancelado",
    "pesimo",
    "horrible",
    "desastroso",
    "negligente",
    "incompetente",
    "lamentable",
    "pobre",
    "terrible",
    "decepcionante",
    "frustrante",
];

/// Forbidden words (policy P3)
const DEFAULT_PROFANITY_WORDS: &[&str] = &[
    "imbecil",
    "estupido",
    "idiota",
    "basura",
    "mierda",
    "puta",
    "gilipollas",
    "pendejo",
    "tarado",
    "cabron",
    "mierdas",
    "malparido",
    "malparida",
    "zorra",
    "zorras",
];

/// Normalized word list matched by substring
/// DOCUMENTATION: Entries are stored accent-stripped and lower-cased so that
/// matching against a normalized comment is a plain `contains`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    words: Vec<String>,
}

impl Lexicon {
    /// Build from raw words; blanks and duplicates are dropped
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for word in words {
            let word = normalize(word.as_ref());
            if !word.is_empty() && !normalized.contains(&word) {
                normalized.push(word);
            }
        }
        Self { words: normalized }
    }

    /// Parse a newline-separated list; `#` starts a comment line
    pub fn parse(contents: &str) -> Self {
        Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Load a word list file
    pub fn load(path: &str) -> Result<Self, ReviewError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read lexicon {}: {}", path, e);
            ReviewError::unexpected(
                "No fue posible cargar la configuración de contenido",
                format!("Reading lexicon file {} failed: {}", path, e),
            )
        })?;

        let lexicon = Self::parse(&contents);
        if lexicon.is_empty() {
            return Err(ReviewError::unexpected(
                "No fue posible cargar la configuración de contenido",
                format!("Lexicon file {} contains no words", path),
            ));
        }

        log::info!("Loaded {} words from {}", lexicon.len(), path);
        Ok(lexicon)
    }

    /// First entry contained in an already normalized text
    pub fn find_in(&self, normalized_text: &str) -> Option<&str> {
        self.words
            .iter()
            .find(|word| normalized_text.contains(word.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Both lexicons used by the content policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicons {
    pub negative: Lexicon,
    pub profanity: Lexicon,
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            negative: Lexicon::from_words(DEFAULT_NEGATIVE_WORDS),
            profanity: Lexicon::from_words(DEFAULT_PROFANITY_WORDS),
        }
    }
}

impl Lexicons {
    /// Built-in lists, replaced by any file configured in `config`
    pub fn load(config: &Config) -> Result<Self, ReviewError> {
        let negative = match &config.negative_lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::from_words(DEFAULT_NEGATIVE_WORDS),
        };
        let profanity = match &config.profanity_lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::from_words(DEFAULT_PROFANITY_WORDS),
        };

        Ok(Self {
            negative,
            profanity,
        })
    }
}
