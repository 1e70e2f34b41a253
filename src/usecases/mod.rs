//! Application use cases. Orchestrate domain logic via ports.

pub mod enrichment;
pub mod resolver;
pub mod search_service;

#[cfg(test)]
pub(crate) mod testing;

pub use enrichment::{EnrichmentService, PromptSettings};
pub use resolver::TermResolver;
pub use search_service::SearchService;
