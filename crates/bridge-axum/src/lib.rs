//! Bridges an axum/tower request cycle onto a GraphQL execution engine.
//!
//! [`GraphqlBridgeLayer`] wraps a handler chain: it normalizes the inbound
//! request into a [`bridge_core::CanonicalRequest`], invokes the
//! [`bridge_core::Executor`] and dispatches the resulting descriptor back
//! onto the transport. The wrapped inner service is the fallback
//! continuation: when the engine rejects a request the bridge hands the
//! original request to it untouched instead of authoring an error body.
//!
//! The one failure the bridge reports itself is the missing parsed body,
//! which means the body-parsing layer was not installed upstream.

mod response;
mod service;

pub use response::{into_axum_response, MISSING_BODY_MESSAGE};
pub use service::{GraphqlBridge, GraphqlBridgeLayer};
