// src/main.rs
// DOCUMENTATION: review-check entry point
// PURPOSE: Run the field and content pipeline over one rating and comment
// and print a JSON verdict. Used to try out lexicon files before rollout

use anyhow::{bail, Context};
use reservation_reviews::config::{Config, Lexicons};
use reservation_reviews::errors::{ErrorKind, ReviewError};
use reservation_reviews::services::{parse_rating, ContentPolicies, ReviewValidator};
use serde::Serialize;
use std::process;

const USAGE: &str = "Usage: review-check <rating> <comment...>";

/// Exit codes
const EXIT_ACCEPTED: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[derive(Debug, Serialize)]
struct Verdict {
    accepted: bool,
    rating: String,
    comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<Rejection>,
}

#[derive(Debug, Serialize)]
struct Rejection {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<&'static str>,
    message: String,
}

impl From<&ReviewError> for Rejection {
    fn from(err: &ReviewError) -> Self {
        let kind = err.kind();
        let policy = match kind {
            ErrorKind::PolicyViolation(policy) => Some(policy.code()),
            _ => None,
        };
        Self {
            kind: kind_label(kind),
            policy,
            message: err.user_message(),
        }
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Obligatory => "obligatory",
        ErrorKind::Length => "length",
        ErrorKind::Format => "format",
        ErrorKind::Range => "range",
        ErrorKind::PolicyViolation(_) => "policy_violation",
        ErrorKind::NotFound => "not_found",
        ErrorKind::InvalidState => "invalid_state",
        ErrorKind::DuplicateReview => "duplicate_review",
        ErrorKind::OwnershipMismatch => "ownership_mismatch",
        ErrorKind::Persistence => "persistence",
        ErrorKind::Unexpected => "unexpected",
    }
}

fn main() {
    let code = match run() {
        Ok(true) => EXIT_ACCEPTED,
        Ok(false) => EXIT_REJECTED,
        Err(e) => {
            eprintln!("review-check: {:#}", e);
            EXIT_USAGE
        }
    };
    process::exit(code);
}

/// Returns whether the review was accepted
fn run() -> anyhow::Result<bool> {
    // 1. Load configuration (.env is read by from_env)
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        bail!("Configuration error: {}", e);
    }

    // 2. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();
    log::debug!("Environment: {}", config.environment);

    // 3. Parse arguments
    let mut args = std::env::args().skip(1);
    let rating_arg = args.next().context(USAGE)?;
    let comment = args.collect::<Vec<_>>().join(" ");
    if comment.is_empty() {
        bail!(USAGE);
    }

    // 4. Build the pipeline
    let lexicons = Lexicons::load(&config)
        .map_err(|e| anyhow::anyhow!(e.technical_message()))
        .context("Failed to load lexicons")?;
    log::info!(
        "Loaded lexicons: {} negative, {} profanity",
        lexicons.negative.len(),
        lexicons.profanity.len()
    );
    let validator = ReviewValidator::new(ContentPolicies::new(lexicons));

    // 5. Validate
    let outcome = parse_rating(&rating_arg)
        .and_then(|rating| validator.validate_content(rating, &comment));

    let verdict = Verdict {
        accepted: outcome.is_ok(),
        rating: rating_arg,
        comment,
        rejection: outcome.as_ref().err().map(Rejection::from),
    };
    if let Err(e) = &outcome {
        log::info!("Review rejected: {}", e);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&verdict).context("Failed to encode verdict")?
    );
    Ok(verdict.accepted)
}
