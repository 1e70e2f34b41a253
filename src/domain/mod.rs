//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    EnrichedText, EnrichmentSource, ResolutionMethod, ResolvedArticle, SearchAnswer, SearchTerm,
};
pub use errors::{CompletionError, KnowledgeError, LookupError, LookupFailure, TransportError};
