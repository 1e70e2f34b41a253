//! AI adapter module. Implements CompletionPort for LLM integration.

pub mod openai_adapter;

pub use openai_adapter::OpenAiAdapter;
