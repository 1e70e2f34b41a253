//! Domain entities. Pure data structures for the core business.
//!
//! All values are request-scoped; nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::LookupFailure;

/// A caller-supplied search term. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate raw input. Rejects empty or whitespace-only text before any I/O happens.
    pub fn parse(raw: &str) -> Result<Self, LookupFailure> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupFailure::missing_term());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the resolver arrived at the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMethod {
    /// The term itself named a page.
    Direct,
    /// The term was ambiguous; the first candidate was used.
    Disambiguated,
    /// No page matched; the first search hit was used.
    Searched,
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionMethod::Direct => "direct",
            ResolutionMethod::Disambiguated => "disambiguated",
            ResolutionMethod::Searched => "searched",
        };
        f.write_str(s)
    }
}

/// An article summary the resolver settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArticle {
    pub title: String,
    pub summary: String,
    pub resolution_method: ResolutionMethod,
}

impl ResolvedArticle {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        resolution_method: ResolutionMethod,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            resolution_method,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentSource {
    Model,
    RawFallback,
}

/// Final text handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedText {
    pub text: String,
    pub source: EnrichmentSource,
    /// Why enrichment was skipped or failed, kept for diagnostic display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EnrichedText {
    pub fn from_model(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: EnrichmentSource::Model,
            note: None,
        }
    }

    pub fn raw(article: &ResolvedArticle, note: Option<String>) -> Self {
        Self {
            text: article.summary.clone(),
            source: EnrichmentSource::RawFallback,
            note,
        }
    }

    pub fn is_model(&self) -> bool {
        self.source == EnrichmentSource::Model
    }
}

/// A resolved article together with its (possibly enriched) rendering text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAnswer {
    pub article: ResolvedArticle,
    pub enriched: EnrichedText,
}
