use crate::{CanonicalRequest, ContextBuilder, ResponseDescriptor};

/// The execution engine's single entry point, seen from the bridge.
///
/// GraphQL-semantic errors (syntax, validation, execution) are expected to
/// arrive already encoded inside a successful [`ResponseDescriptor`]; an
/// `Err` here means the engine rejected the request outright and the bridge
/// will delegate response production to the next handler in the chain.
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    type Context: Send + 'static;
    type Error: std::error::Error + Send;

    async fn execute(
        &self,
        request: CanonicalRequest,
        ctx: ContextBuilder<'_, Self::Context>,
    ) -> Result<ResponseDescriptor, Self::Error>;
}
