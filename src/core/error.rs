//! Error types for the traffic-manager library
//!
//! Every failure the core can produce is a value of [`Error`]; nothing in the
//! core panics on well-formed input.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Minimum blended similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Find the candidate closest to `input`, if any is close enough to suggest.
///
/// Scores are 70% Jaro-Winkler (good for transpositions and shared prefixes,
/// e.g. "Ambulnace") blended with 30% normalized Levenshtein (insertions and
/// deletions, e.g. "Ambulace"). Comparison is case-insensitive, so a point
/// typed as "downtown" suggests "Downtown".
pub fn suggest_closest<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lower = input.to_lowercase();
    let mut best_match = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        if candidate == input {
            return None;
        }
        let candidate_lower = candidate.to_lowercase();

        let jw_score = jaro_winkler(&input_lower, &candidate_lower);
        let lev_score = normalized_levenshtein(&input_lower, &candidate_lower);
        let score = (jw_score * 0.7) + (lev_score * 0.3);

        if score >= SUGGESTION_THRESHOLD && score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

/// Main error type for traffic-manager operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Distance or congestion is negative, NaN or infinite
    #[error("invalid {field} {value}: must be finite and non-negative")]
    InvalidDistance { field: &'static str, value: f64 },

    /// Path query named a point that was never added to the network
    #[error("unknown point '{node}'{}", did_you_mean(.suggestion))]
    UnknownNode {
        node: String,
        suggestion: Option<String>,
    },

    /// Both points exist but lie in disconnected parts of the network
    #[error("No path available from {from} to {to}")]
    NoPath { from: String, to: String },

    /// Vehicle class outside the priority table while strict classes are on
    #[error("unknown vehicle class '{class}'{}", did_you_mean(.suggestion))]
    UnknownVehicleClass {
        class: String,
        suggestion: Option<String>,
    },

    /// Lane outside the configured lane set
    #[error("unknown lane '{0}'")]
    UnknownLane(String),
}

impl Error {
    /// True for both flavours of a failed path query (unknown point or no
    /// connecting route). Callers that only need "found / not found" use this.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownNode { .. } | Error::NoPath { .. })
    }
}

/// Convenience result type for traffic-manager operations
pub type Result<T> = std::result::Result<T, Error>;
