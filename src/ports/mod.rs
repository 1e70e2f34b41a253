//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/transport into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::LookupPort;
pub use outbound::{CompletionPort, KnowledgeSource};
