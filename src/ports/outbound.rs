//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CompletionError, KnowledgeError};

/// Encyclopedia gateway. Summaries and ranked title search.
#[async_trait::async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch the lead summary of the article named `title`, truncated to `sentences` sentences.
    ///
    /// # Errors
    /// - `Ambiguous(candidates)` when `title` names a disambiguation page
    /// - `NotFound` when no page exists
    /// - `Other` for transport or parse failures
    async fn summarize(
        &self,
        title: &str,
        sentences: usize,
        locale: &str,
    ) -> Result<String, KnowledgeError>;

    /// Full-text search. Returns at most `max_results` titles, best match first.
    async fn search(
        &self,
        term: &str,
        locale: &str,
        max_results: usize,
    ) -> Result<Vec<String>, KnowledgeError>;
}

/// Text-completion collaborator (LLM). Given a prompt, return text or fail.
#[async_trait::async_trait]
pub trait CompletionPort: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, CompletionError>;
}
