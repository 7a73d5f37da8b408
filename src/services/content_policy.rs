// src/services/content_policy.rs
// DOCUMENTATION: Content rules applied after structural validation
// PURPOSE: P1 negative-sentiment floor, P2 no links/markup, P3 no profanity

use crate::config::Lexicons;
use crate::errors::{Policy, ReviewError};
use crate::services::text_normalizer::normalize;
use lazy_static::lazy_static;
use regex::Regex;

/// Ratings at or below this value trigger P1
pub const LOW_RATING_THRESHOLD: i32 = 2;

/// Minimum trimmed comment length for a low rating
pub const LOW_RATING_MIN_CHARS: usize = 50;

lazy_static! {
    static ref PROTOCOL_URL: Regex =
        Regex::new(r"https?://\S+").expect("protocol URL pattern is valid");
    static ref WWW_URL: Regex = Regex::new(r"www\.\S+").expect("www pattern is valid");
    static ref BARE_DOMAIN: Regex =
        Regex::new(r"\b\w+\.(com|net|org|info|io|es|co)(/\S*)?\b")
            .expect("bare domain pattern is valid");
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]+>").expect("markup pattern is valid");
}

/// Content policy checks
/// DOCUMENTATION: Stateless apart from the injected lexicons; every check is
/// a pure function of rating and comment
#[derive(Debug, Clone, Default)]
pub struct ContentPolicies {
    lexicons: Lexicons,
}

impl ContentPolicies {
    pub fn new(lexicons: Lexicons) -> Self {
        Self { lexicons }
    }

    /// Run P1, P2 and P3 in order
    pub fn check(&self, rating: i32, comment: &str) -> Result<(), ReviewError> {
        self.check_negative_sentiment(rating, comment)?;
        check_links_and_markup(comment)?;
        self.check_profanity(comment)?;
        Ok(())
    }

    /// P1: a rating of 2 or less needs at least 50 characters and a
    /// negative-sentiment word
    pub fn check_negative_sentiment(&self, rating: i32, comment: &str) -> Result<(), ReviewError> {
        if rating > LOW_RATING_THRESHOLD {
            return Ok(());
        }

        let trimmed = comment.trim();
        if trimmed.chars().count() < LOW_RATING_MIN_CHARS {
            return Err(ReviewError::policy(
                Policy::NegativeSentimentFloor,
                format!(
                    "Con calificación ≤ {}, el comentario debe tener al menos {} caracteres.",
                    LOW_RATING_THRESHOLD, LOW_RATING_MIN_CHARS
                ),
            ));
        }

        if self.lexicons.negative.find_in(&normalize(trimmed)).is_none() {
            return Err(ReviewError::policy(
                Policy::NegativeSentimentFloor,
                format!(
                    "Con calificación ≤ {}, debes mencionar al menos un aspecto negativo (ej.: \"mal\", \"deficiente\", \"pésimo\", \"horrible\").",
                    LOW_RATING_THRESHOLD
                ),
            ));
        }

        Ok(())
    }

    /// P3: no word from the profanity lexicon, accents ignored
    pub fn check_profanity(&self, comment: &str) -> Result<(), ReviewError> {
        if let Some(word) = self.lexicons.profanity.find_in(&normalize(comment)) {
            log::debug!("Profanity lexicon hit: {}", word);
            return Err(ReviewError::policy(
                Policy::NoProfanity,
                "El comentario contiene palabras ofensivas. Por favor, mantén un lenguaje respetuoso.",
            ));
        }
        Ok(())
    }
}

/// P2: no protocol URLs, `www.` links, bare domains or markup tags
pub fn check_links_and_markup(comment: &str) -> Result<(), ReviewError> {
    let lower = comment.to_lowercase();

    if PROTOCOL_URL.is_match(&lower) {
        return Err(ReviewError::policy(
            Policy::NoLinksOrMarkup,
            "El comentario no puede contener URLs con protocolo (http:// o https://).",
        ));
    }

    if WWW_URL.is_match(&lower) {
        return Err(ReviewError::policy(
            Policy::NoLinksOrMarkup,
            "El comentario no puede contener URLs que empiecen con 'www.'.",
        ));
    }

    if BARE_DOMAIN.is_match(&lower) {
        return Err(ReviewError::policy(
            Policy::NoLinksOrMarkup,
            "El comentario no puede contener referencias a dominios (.com, .net, .org, etc.).",
        ));
    }

    if MARKUP_TAG.is_match(comment) {
        return Err(ReviewError::policy(
            Policy::NoLinksOrMarkup,
            "El comentario no puede contener etiquetas HTML (p.ej. <a>, <script>, etc.).",
        ));
    }

    Ok(())
}
