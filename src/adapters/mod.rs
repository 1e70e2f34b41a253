//! Infrastructure adapters. Implement outbound ports.
//!
//! Wikipedia, OpenAI, HTTP transport, terminal UI. Map errors to domain errors.

pub mod ai;
pub mod http;
pub mod ui;
pub mod wikipedia;
