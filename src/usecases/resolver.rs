//! Term resolution: direct lookup, then disambiguation or search fallback.
//!
//! Every knowledge-source failure is converted into a `LookupFailure` here;
//! nothing above this use case sees a source error.

use crate::domain::{
    KnowledgeError, LookupError, LookupFailure, ResolutionMethod, ResolvedArticle, SearchTerm,
};
use crate::ports::{KnowledgeSource, LookupPort};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Max titles requested from the broader search when the term names no page.
pub const MAX_SEARCH_RESULTS: usize = 3;

/// Resolves free-text terms to article summaries.
///
/// Policy on ambiguity and search is deterministic: the first candidate, in the
/// order the source returned them, is always taken.
pub struct TermResolver {
    source: Arc<dyn KnowledgeSource>,
    sentences: usize,
    locale: String,
}

impl TermResolver {
    /// # Arguments
    /// * `source` - Knowledge source port (Wikipedia adapter, fake in tests)
    /// * `sentences` - Sentence count requested for each summary
    /// * `locale` - Wiki language code, e.g. "pt"
    pub fn new(source: Arc<dyn KnowledgeSource>, sentences: usize, locale: impl Into<String>) -> Self {
        Self {
            source,
            sentences,
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resolve `raw` to an article, or explain why not.
    pub async fn resolve(&self, raw: &str) -> Result<ResolvedArticle, LookupFailure> {
        let term = SearchTerm::parse(raw)?;
        info!(term = %term, locale = %self.locale, "resolving term");

        match self.summarize(term.as_str()).await {
            Ok(summary) => Ok(ResolvedArticle::new(
                term.as_str(),
                summary,
                ResolutionMethod::Direct,
            )),
            Err(KnowledgeError::Ambiguous(candidates)) => {
                debug!(term = %term, candidates = candidates.len(), "term is ambiguous");
                match candidates.into_iter().next() {
                    Some(first) => {
                        self.fetch(&term, first, ResolutionMethod::Disambiguated)
                            .await
                    }
                    None => Err(LookupFailure::new(
                        term.as_str(),
                        "ambiguous term with no candidates",
                    )),
                }
            }
            Err(KnowledgeError::NotFound) => {
                debug!(term = %term, "no direct page; falling back to search");
                let hits = self
                    .source
                    .search(term.as_str(), &self.locale, MAX_SEARCH_RESULTS)
                    .await
                    .map_err(|e| self.failure(&term, e))?;
                match hits.into_iter().next() {
                    Some(first) => self.fetch(&term, first, ResolutionMethod::Searched).await,
                    None => {
                        info!(term = %term, "search returned no candidates");
                        Err(LookupFailure::no_results(term.as_str()))
                    }
                }
            }
            Err(e) => Err(self.failure(&term, e)),
        }
    }

    async fn summarize(&self, title: &str) -> Result<String, KnowledgeError> {
        self.source
            .summarize(title, self.sentences, &self.locale)
            .await
    }

    /// Single fallback fetch for a candidate title. Any error ends the lookup.
    async fn fetch(
        &self,
        term: &SearchTerm,
        title: String,
        method: ResolutionMethod,
    ) -> Result<ResolvedArticle, LookupFailure> {
        let summary = self
            .summarize(&title)
            .await
            .map_err(|e| self.failure(term, e))?;
        info!(term = %term, title = %title, method = %method, "resolved via fallback");
        Ok(ResolvedArticle::new(title, summary, method))
    }

    fn failure(&self, term: &SearchTerm, err: KnowledgeError) -> LookupFailure {
        warn!(term = %term, error = %err, "lookup failed");
        LookupFailure::new(term.as_str(), err.to_string())
    }
}

#[async_trait::async_trait]
impl LookupPort for TermResolver {
    async fn lookup(&self, term: &str) -> Result<ResolvedArticle, LookupError> {
        self.resolve(term).await.map_err(LookupError::from)
    }
}
