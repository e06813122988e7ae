//! The transport-agnostic half of the GraphQL HTTP bridge: the canonical
//! request shape handed to the execution engine, the response descriptor the
//! engine hands back, and the executor boundary between the two.
//!
//! Response bodies follow the GraphQL over HTTP spec:
//!
//! https://github.com/graphql/graphql-over-http/blob/main/spec/GraphQLOverHTTP.md
//!
//! A complete body is a single pre-serialized payload; a chunked body is an
//! ordered stream of fragments delivered incrementally (incremental delivery
//! or GraphQL over SSE, see [`streaming`]).

mod context;
mod executor;
mod request;
mod response;
pub mod streaming;

pub use context::{ContextBuilder, ContextFactory};
pub use executor::Executor;
pub use request::{CanonicalRequest, MissingParsedBody, ParsedBody};
pub use response::{ResponseBody, ResponseDescriptor};
