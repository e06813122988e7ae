use bytes::Bytes;
use futures_util::{stream::BoxStream, Stream};
use headers::HeaderMapExt;

use crate::streaming::{encode_response_stream, StreamingFormat};

/// The engine's output record. Produced once per request, consumed exactly
/// once by the dispatcher, never retained afterwards.
pub struct ResponseDescriptor {
    /// `None` means 200. A zero status is unrepresentable in
    /// `http::StatusCode`, so absent covers the whole defaulting rule.
    pub status: Option<http::StatusCode>,
    pub headers: http::HeaderMap,
    pub body: ResponseBody,
}

/// Exactly one of the two delivery modes. The dispatcher matches
/// exhaustively, so growing this enum breaks delivery sites loudly instead of
/// silently ignoring a new mode.
pub enum ResponseBody {
    /// One fully-buffered payload, written as the entire response body.
    Complete(String),
    /// An ordered stream of fragments written to the transport one at a
    /// time. An `Err` fragment aborts the response mid-stream.
    Chunked(BoxStream<'static, Result<Bytes, String>>),
}

impl ResponseDescriptor {
    pub fn status_or_default(&self) -> http::StatusCode {
        self.status.unwrap_or(http::StatusCode::OK)
    }

    /// A complete JSON response with `content-type` and `content-length`
    /// already set.
    pub fn json(value: &impl serde::Serialize) -> serde_json::Result<Self> {
        let payload = serde_json::to_string(value)?;
        let mut headers = http::HeaderMap::new();
        headers.typed_insert(headers::ContentType::json());
        headers.typed_insert(headers::ContentLength(payload.len() as u64));
        Ok(ResponseDescriptor {
            status: None,
            headers,
            body: ResponseBody::Complete(payload),
        })
    }

    /// A chunked response encoding `payload_stream` in the given
    /// GraphQL-over-HTTP streaming format.
    pub fn streaming<T>(format: StreamingFormat, payload_stream: impl Stream<Item = T> + Send + 'static) -> Self
    where
        T: serde::Serialize + Send + 'static,
    {
        let (headers, stream) = encode_response_stream(payload_stream, format);
        ResponseDescriptor {
            status: None,
            headers,
            body: ResponseBody::Chunked(stream),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_200_when_absent() {
        let descriptor = ResponseDescriptor::json(&serde_json::json!({"data": null})).unwrap();
        assert_eq!(descriptor.status_or_default(), http::StatusCode::OK);
    }

    #[test]
    fn explicit_status_is_used_verbatim() {
        let mut descriptor = ResponseDescriptor::json(&serde_json::json!({"data": null})).unwrap();
        descriptor.status = Some(http::StatusCode::BAD_REQUEST);
        assert_eq!(descriptor.status_or_default(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn json_sets_content_type_and_length() {
        let descriptor = ResponseDescriptor::json(&serde_json::json!({"data": {"ok": true}})).unwrap();
        assert_eq!(
            descriptor.headers.typed_get::<headers::ContentType>(),
            Some(headers::ContentType::json())
        );
        let ResponseBody::Complete(payload) = &descriptor.body else {
            unreachable!("ResponseDescriptor::json always builds a complete body");
        };
        assert_eq!(
            descriptor.headers.typed_get::<headers::ContentLength>().map(|h| h.0),
            Some(payload.len() as u64)
        );
    }
}
