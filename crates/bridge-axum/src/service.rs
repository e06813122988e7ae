use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::body::Body;
use bridge_core::{CanonicalRequest, ContextBuilder, ContextFactory, Executor, ParsedBody};
use http::{Request, Response};
use tower::{Layer, Service};

use crate::response::{into_axum_response, missing_body_response};

/// Mounts a [`GraphqlBridge`] in front of a handler chain. The wrapped
/// service is the fallback continuation for engine failures.
pub struct GraphqlBridgeLayer<E: Executor> {
    executor: Arc<E>,
    context_factory: ContextFactory<E::Context>,
}

impl<E: Executor> GraphqlBridgeLayer<E> {
    pub fn new(executor: Arc<E>) -> Self
    where
        E::Context: Default,
    {
        GraphqlBridgeLayer {
            executor,
            context_factory: ContextFactory::default(),
        }
    }

    /// Overrides the default empty-context construction. Required when the
    /// engine's context type has no `Default`.
    pub fn with_context_factory(executor: Arc<E>, context_factory: ContextFactory<E::Context>) -> Self {
        GraphqlBridgeLayer {
            executor,
            context_factory,
        }
    }
}

// Not derived, E itself doesn't need to be Clone behind the Arc.
impl<E: Executor> Clone for GraphqlBridgeLayer<E> {
    fn clone(&self) -> Self {
        GraphqlBridgeLayer {
            executor: Arc::clone(&self.executor),
            context_factory: self.context_factory.clone(),
        }
    }
}

impl<S, E: Executor> Layer<S> for GraphqlBridgeLayer<E> {
    type Service = GraphqlBridge<S, E>;

    fn layer(&self, inner: S) -> Self::Service {
        GraphqlBridge {
            inner,
            executor: Arc::clone(&self.executor),
            context_factory: self.context_factory.clone(),
        }
    }
}

/// The bridge itself. Per request: check the parsed-body precondition,
/// normalize, invoke the engine, dispatch its descriptor. On engine failure
/// the original request is handed to the inner service, exactly once, and
/// the bridge writes no error body of its own.
pub struct GraphqlBridge<S, E: Executor> {
    inner: S,
    executor: Arc<E>,
    context_factory: ContextFactory<E::Context>,
}

impl<S: Clone, E: Executor> Clone for GraphqlBridge<S, E> {
    fn clone(&self) -> Self {
        GraphqlBridge {
            inner: self.inner.clone(),
            executor: Arc::clone(&self.executor),
            context_factory: self.context_factory.clone(),
        }
    }
}

impl<S, E> Service<Request<Body>> for GraphqlBridge<S, E>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
    E: Executor + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let executor = Arc::clone(&self.executor);
        let context_factory = self.context_factory.clone();

        Box::pin(async move {
            // Setup error, not an engine error: without a parsed body there
            // is nothing to hand to the engine, so the bridge reports the
            // misconfiguration itself and stops here.
            let body_value = match ParsedBody::from_extensions(request.extensions()) {
                Ok(parsed) => parsed.0.clone(),
                Err(err) => {
                    tracing::error!("{err}");
                    return Ok(missing_body_response());
                }
            };

            let (parts, raw_body) = request.into_parts();
            let canonical = CanonicalRequest::from_parts(&parts, body_value);
            let ctx = ContextBuilder::new(&context_factory, &parts);

            match executor.execute(canonical, ctx).await {
                Ok(descriptor) => Ok(into_axum_response(descriptor)),
                Err(err) => {
                    // Engine-level failures are the next handler's to format.
                    tracing::debug!("engine rejected the request, delegating to the next handler: {err}");
                    inner.call(Request::from_parts(parts, raw_body)).await
                }
            }
        })
    }
}
