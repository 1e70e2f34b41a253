//! Wikipedia adapter. Implements KnowledgeSource over the MediaWiki Action API.

pub mod client;

pub use client::WikipediaAdapter;
