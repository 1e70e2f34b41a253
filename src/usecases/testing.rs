//! In-memory port fakes shared by use case and adapter tests.

use crate::domain::{CompletionError, KnowledgeError};
use crate::ports::{CompletionPort, KnowledgeSource};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted knowledge source. Records every call as `summarize:<title>` or `search:<term>`.
#[derive(Default)]
pub struct FakeSource {
    summaries: HashMap<String, Result<String, KnowledgeError>>,
    searches: HashMap<String, Result<Vec<String>, KnowledgeError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, title: &str, summary: &str) -> Self {
        self.summaries
            .insert(title.to_string(), Ok(summary.to_string()));
        self
    }

    pub fn with_summary_error(mut self, title: &str, err: KnowledgeError) -> Self {
        self.summaries.insert(title.to_string(), Err(err));
        self
    }

    pub fn with_search(mut self, term: &str, hits: &[&str]) -> Self {
        self.searches.insert(
            term.to_string(),
            Ok(hits.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn with_search_error(mut self, term: &str, err: KnowledgeError) -> Self {
        self.searches.insert(term.to_string(), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl KnowledgeSource for FakeSource {
    async fn summarize(
        &self,
        title: &str,
        _sentences: usize,
        _locale: &str,
    ) -> Result<String, KnowledgeError> {
        self.calls.lock().unwrap().push(format!("summarize:{title}"));
        self.summaries
            .get(title)
            .cloned()
            .unwrap_or(Err(KnowledgeError::NotFound))
    }

    async fn search(
        &self,
        term: &str,
        _locale: &str,
        max_results: usize,
    ) -> Result<Vec<String>, KnowledgeError> {
        self.calls.lock().unwrap().push(format!("search:{term}"));
        self.searches
            .get(term)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
            .map(|hits| hits.into_iter().take(max_results).collect())
    }
}

/// Completion fake returning a fixed result. Records the prompts it received.
pub struct FakeCompletion {
    result: Result<String, CompletionError>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeCompletion {
    pub fn ok(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CompletionError) -> Self {
        Self {
            result: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionPort for FakeCompletion {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.result.clone()
    }
}
