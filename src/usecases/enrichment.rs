//! Enrichment stage. Asks the completion port for a didactic rewrite of a summary.
//!
//! Never fails: a missing credential or any completion error degrades to the raw summary.

use crate::domain::{EnrichedText, ResolvedArticle};
use crate::ports::CompletionPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Tunables for the enrichment prompt.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// Human-readable target language, e.g. "Portuguese".
    pub language: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            language: language_for_locale("pt").to_string(),
            max_tokens: 400,
            temperature: 0.7,
        }
    }
}

/// Map a wiki locale code to the language name used in the prompt.
pub fn language_for_locale(locale: &str) -> &str {
    match locale {
        "pt" => "Portuguese",
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        other => other,
    }
}

/// Enrichment service.
///
/// `completion` is `None` when no credential was found; the service then returns
/// the raw summary without touching the network.
pub struct EnrichmentService {
    completion: Option<Arc<dyn CompletionPort>>,
    settings: PromptSettings,
}

impl EnrichmentService {
    pub fn new(completion: Option<Arc<dyn CompletionPort>>, settings: PromptSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Service that always returns the raw summary.
    pub fn disabled() -> Self {
        Self::new(None, PromptSettings::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.completion.is_some()
    }

    pub async fn enrich(&self, article: &ResolvedArticle, original_term: &str) -> EnrichedText {
        let Some(completion) = &self.completion else {
            info!(title = %article.title, "no completion credential; returning raw summary");
            return EnrichedText::raw(article, None);
        };

        let system = self.system_prompt();
        let user = Self::user_prompt(article, original_term);

        match completion
            .complete(
                &system,
                &user,
                self.settings.max_tokens,
                self.settings.temperature,
            )
            .await
        {
            Ok(text) if !text.trim().is_empty() => {
                info!(title = %article.title, len = text.len(), "enrichment complete");
                EnrichedText::from_model(text.trim())
            }
            Ok(_) => {
                warn!(title = %article.title, "completion returned empty text");
                EnrichedText::raw(article, Some("completion returned empty text".to_string()))
            }
            Err(e) => {
                warn!(title = %article.title, error = %e, "enrichment failed; using raw summary");
                EnrichedText::raw(article, Some(e.to_string()))
            }
        }
    }

    fn system_prompt(&self) -> String {
        format!(
            "You are an expert at writing educational, informative summaries. \
             Explain concepts clearly, didactically and engagingly in {}. \
             Keep a professional but accessible tone.",
            self.settings.language
        )
    }

    fn user_prompt(article: &ResolvedArticle, original_term: &str) -> String {
        format!(
            "Based on the Wikipedia information about '{}', write a clear and informative summary that:\n\
             - Explains the main concept\n\
             - Highlights the most interesting points\n\
             - Uses accessible language\n\
             - Is between 150 and 300 words\n\n\
             Wikipedia information ({}):\n{}",
            original_term, article.title, article.summary
        )
    }
}
