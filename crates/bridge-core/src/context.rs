use std::sync::Arc;

/// Builds the per-request context value consumed by the engine's resolvers.
///
/// The bridge is agnostic to what shape of context the engine requires; the
/// factory receives the native request parts so custom context logic can read
/// transport state (headers, URI, extensions). The default factory produces
/// `C::default()`.
pub struct ContextFactory<C>(Arc<dyn Fn(&http::request::Parts) -> C + Send + Sync>);

impl<C> ContextFactory<C> {
    pub fn new(factory: impl Fn(&http::request::Parts) -> C + Send + Sync + 'static) -> Self {
        ContextFactory(Arc::new(factory))
    }
}

impl<C: Default> Default for ContextFactory<C> {
    fn default() -> Self {
        ContextFactory(Arc::new(|_| C::default()))
    }
}

// Not derived, C itself doesn't need to be Clone.
impl<C> Clone for ContextFactory<C> {
    fn clone(&self) -> Self {
        ContextFactory(Arc::clone(&self.0))
    }
}

/// Handed to [`Executor::execute`](crate::Executor::execute) so the context
/// is constructed lazily, at the moment the engine asks for it, and at most
/// once: [`build`](Self::build) consumes the builder.
pub struct ContextBuilder<'a, C> {
    factory: &'a ContextFactory<C>,
    parts: &'a http::request::Parts,
}

impl<'a, C> ContextBuilder<'a, C> {
    pub fn new(factory: &'a ContextFactory<C>, parts: &'a http::request::Parts) -> Self {
        ContextBuilder { factory, parts }
    }

    /// The native request parts, for engines that want transport state
    /// without going through the context.
    pub fn parts(&self) -> &http::request::Parts {
        self.parts
    }

    pub fn build(self) -> C {
        (self.factory.0)(self.parts)
    }
}
