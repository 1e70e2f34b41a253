//! Inbound port. Presentation and transport call into the application through it.

use crate::domain::{LookupError, ResolvedArticle};

/// Resolve a raw term to an article.
///
/// Implemented in-process by `TermResolver` and over the network by `LookupClient`,
/// so the search service runs the same flow for both deployment shapes.
#[async_trait::async_trait]
pub trait LookupPort: Send + Sync {
    async fn lookup(&self, term: &str) -> Result<ResolvedArticle, LookupError>;
}
