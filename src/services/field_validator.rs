// src/services/field_validator.rs
// DOCUMENTATION: Structural checks for review fields
// PURPOSE: Obligatory, length, format and range rules, fail-fast

use crate::errors::ReviewError;
use crate::models::UNSET_RATING;
use chrono::{Datelike, NaiveDate};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MIN_COMMENT_CHARS: usize = 20;
pub const MAX_COMMENT_CHARS: usize = 500;

/// Review dates must fall within these years (inclusive)
const MIN_REVIEW_YEAR: i32 = 2025;
const MAX_REVIEW_YEAR: i32 = 9999;

/// Punctuation accepted in comments besides letters, digits and whitespace
// `<`, `>`, `:` and `/` must stay: links and tags are rejected by P2, not here
const ALLOWED_PUNCTUATION: &[char] = &[
    '@', '-', '_', '.', '$', ',', ';', ':', '!', '?', '¡', '¿', '(', ')', '"', '\'', '/', '<',
    '>', '=', '&', '%', '#', '+', '*', '°',
];

/// Validate a rating value
/// DOCUMENTATION: 0 is the "missing" sentinel. Any other integer outside
/// [1,5] is a range error, so accepted values are always a single digit
pub fn validate_rating(rating: i32) -> Result<(), ReviewError> {
    if rating == UNSET_RATING {
        return Err(ReviewError::Obligatory(
            "La calificación es un dato obligatorio.".to_string(),
        ));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewError::Range(format!(
            "La calificación debe estar entre {} y {}. Se ingresó: {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }

    Ok(())
}

/// Parse a rating typed as text (forms, command line) and validate it
pub fn parse_rating(raw: &str) -> Result<i32, ReviewError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ReviewError::Obligatory(
            "La calificación es un dato obligatorio.".to_string(),
        ));
    }

    let rating: i32 = raw.parse().map_err(|_| {
        ReviewError::Format(format!(
            "La calificación solo puede contener números enteros (sin decimales ni texto). Se recibió: {}",
            raw
        ))
    })?;

    validate_rating(rating)?;
    Ok(rating)
}

/// Validate a comment: obligatory, then length, then format
pub fn validate_comment(comment: &str) -> Result<(), ReviewError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::Obligatory(
            "El comentario de la reseña es un dato obligatorio.".to_string(),
        ));
    }

    let length = trimmed.chars().count();
    if !(MIN_COMMENT_CHARS..=MAX_COMMENT_CHARS).contains(&length) {
        return Err(ReviewError::Length(format!(
            "El comentario debe tener entre {} y {} caracteres y el ingresado tiene {}.",
            MIN_COMMENT_CHARS, MAX_COMMENT_CHARS, length
        )));
    }

    if let Some(invalid) = trimmed.chars().find(|c| !is_allowed_comment_char(*c)) {
        return Err(ReviewError::Format(format!(
            "El comentario solo puede contener letras, números, espacios y caracteres especiales permitidos (@, -, _, ., $...). Carácter no permitido: '{}'",
            invalid
        )));
    }

    Ok(())
}

fn is_allowed_comment_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Review dates are server-assigned; reject any client-supplied one
pub fn reject_client_date(date: Option<NaiveDate>) -> Result<(), ReviewError> {
    match date {
        Some(_) => Err(ReviewError::Format(
            "No puedes proporcionar la fecha de la reseña; se asigna automáticamente.".to_string(),
        )),
        None => Ok(()),
    }
}

/// Validate the (server-assigned) review date range
pub fn validate_date(date: NaiveDate) -> Result<(), ReviewError> {
    if date.year() < MIN_REVIEW_YEAR || date.year() > MAX_REVIEW_YEAR {
        return Err(ReviewError::Range(format!(
            "La fecha de la reseña debe estar entre 01/01/{} y 31/12/{}. Se ingresó: {}",
            MIN_REVIEW_YEAR, MAX_REVIEW_YEAR, date
        )));
    }
    Ok(())
}
