//! JSON bodies exchanged between the lookup server and its client.

use crate::domain::{LookupFailure, ResolutionMethod, ResolvedArticle};
use serde::{Deserialize, Serialize};

/// Tool name of the lookup endpoint, served at `/tools/{LOOKUP_TOOL}`.
pub const LOOKUP_TOOL: &str = "buscar_wikipedia";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub busca: Option<String>,
}

/// Successful tool reply. `title` and `resolution` are present only when the term resolved;
/// otherwise `content` carries the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionMethod>,
}

impl ToolResponse {
    pub fn resolved(article: &ResolvedArticle) -> Self {
        Self {
            content: article.summary.clone(),
            title: Some(article.title.clone()),
            resolution: Some(article.resolution_method),
        }
    }

    pub fn failed(failure: &LookupFailure) -> Self {
        let content = if failure.reason == LookupFailure::NO_RESULTS {
            format!("No information found for \"{}\" on Wikipedia.", failure.term)
        } else {
            format!("Search error: {}", failure.reason)
        };
        Self {
            content,
            title: None,
            resolution: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.title.is_some() && self.resolution.is_some()
    }

    /// Rebuild the article on the client side. Failure replies keep the server's message as reason.
    pub fn into_article(self, term: &str) -> Result<ResolvedArticle, LookupFailure> {
        match (self.title, self.resolution) {
            (Some(title), Some(method)) => Ok(ResolvedArticle::new(title, self.content, method)),
            _ => Err(LookupFailure::new(term, self.content)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
}
