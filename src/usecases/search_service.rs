//! Search use case: lookup, then enrichment.
//!
//! The lookup is a port, so the in-process resolver and the remote client share this flow.

use crate::domain::{LookupError, SearchAnswer, SearchTerm};
use crate::ports::LookupPort;
use crate::usecases::enrichment::EnrichmentService;
use std::sync::Arc;
use tracing::info;

pub struct SearchService {
    lookup: Arc<dyn LookupPort>,
    enrichment: Arc<EnrichmentService>,
}

impl SearchService {
    pub fn new(lookup: Arc<dyn LookupPort>, enrichment: Arc<EnrichmentService>) -> Self {
        Self { lookup, enrichment }
    }

    /// Resolve `raw` and enrich the result. Lookup failures short-circuit enrichment.
    pub async fn search(&self, raw: &str) -> Result<SearchAnswer, LookupError> {
        let term = SearchTerm::parse(raw)?;
        let article = self.lookup.lookup(term.as_str()).await?;
        let enriched = self.enrichment.enrich(&article, term.as_str()).await;
        info!(
            term = %term,
            title = %article.title,
            method = %article.resolution_method,
            enriched = enriched.is_model(),
            "search complete"
        );
        Ok(SearchAnswer { article, enriched })
    }
}
