//! wiki-enrich: Wikipedia lookup with LLM enrichment, in-process or behind an HTTP endpoint.
//! Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
