use axum::response::IntoResponse;
use bridge_core::{ResponseBody, ResponseDescriptor};

/// Emitted with a 500 when no body-parsing layer ran before the bridge. This
/// is a misconfiguration the bridge reports itself; it is not the engine
/// delegation path.
pub const MISSING_BODY_MESSAGE: &str = "`request.extensions` has no parsed body; this probably means you \
     forgot to install a body-parsing layer before the GraphQL bridge layer.";

/// Applies a response descriptor to the transport. Headers and status travel
/// in the response head, ahead of any body byte; the body follows in the
/// descriptor's delivery mode.
pub fn into_axum_response(descriptor: ResponseDescriptor) -> axum::response::Response {
    let status = descriptor.status_or_default();
    match descriptor.body {
        // One synchronous buffer, nothing chunked, no headers added beyond
        // the descriptor's.
        ResponseBody::Complete(payload) => {
            (status, descriptor.headers, axum::body::Body::from(payload)).into_response()
        }
        // hyper pulls one fragment at a time and only after the previous
        // write was accepted, which preserves ordering and backpressure. If
        // the client goes away the body is dropped and the stream stops
        // being consumed.
        ResponseBody::Chunked(stream) => (
            status,
            descriptor.headers,
            axum::body::Body::from_stream(stream),
        )
            .into_response(),
    }
}

pub(crate) fn missing_body_response() -> axum::response::Response {
    (http::StatusCode::INTERNAL_SERVER_ERROR, MISSING_BODY_MESSAGE).into_response()
}
