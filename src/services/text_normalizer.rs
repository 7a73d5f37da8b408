// src/services/text_normalizer.rs
// DOCUMENTATION: Accent and case folding for lexicon matching

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trim, drop diacritics and lower-case
/// DOCUMENTATION: "Pésimo " and "PESIMO" both become "pesimo"
pub fn normalize(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
