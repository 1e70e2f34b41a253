//! HTTP transport for the networked deployment shape.
//!
//! Server exposes the term resolver; client implements LookupPort against it.

pub mod client;
pub mod server;
pub mod wire;

pub use client::LookupClient;
pub use server::{router, serve};
pub use wire::{LOOKUP_TOOL, ToolRequest, ToolResponse};
