//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Terminal value when no article could be resolved for a term.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lookup for \"{term}\" failed: {reason}")]
pub struct LookupFailure {
    pub term: String,
    pub reason: String,
}

impl LookupFailure {
    pub const MISSING_TERM: &'static str = "missing term";
    pub const NO_RESULTS: &'static str = "no results";

    pub fn new(term: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_term() -> Self {
        Self::new("", Self::MISSING_TERM)
    }

    pub fn no_results(term: impl Into<String>) -> Self {
        Self::new(term, Self::NO_RESULTS)
    }

    pub fn is_missing_term(&self) -> bool {
        self.reason == Self::MISSING_TERM
    }
}

/// Failures reported by the knowledge source (Wikipedia).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    /// Several articles match; candidates in the order the source returned them.
    #[error("ambiguous term, candidates: {}", .0.join(", "))]
    Ambiguous(Vec<String>),

    #[error("page not found")]
    NotFound,

    #[error("knowledge source error: {0}")]
    Other(String),
}

/// Failures reported by the text-completion collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion API rejected the credential: {0}")]
    Unauthorized(String),

    #[error("completion API rate limit or quota exceeded")]
    RateLimited,

    #[error("completion failed: {0}")]
    Other(String),
}

/// Failures talking to the lookup server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Server answered 400: the request lacked a usable `busca` field.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not reach server: {0}")]
    Connection(String),

    #[error("malformed server response: {0}")]
    Decode(String),
}

/// Result error of the lookup port: either the term did not resolve, or the lookup never ran.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    NotResolved(#[from] LookupFailure),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
