mod format;

use bytes::Bytes;
use futures_util::{stream, stream::BoxStream, Stream, StreamExt};
use headers::HeaderMapExt;

pub use format::StreamingFormat;

// The boundary we put in the content-type header below.
const MULTIPART_BOUNDARY: &str = "-";

/// Encodes a stream of serializable payloads as a chunked response body in
/// the requested format, together with the headers that announce it. Each
/// payload is encoded on demand as the transport drains the stream, nothing
/// is buffered ahead.
pub fn encode_response_stream<T>(
    payload_stream: impl Stream<Item = T> + Send + 'static,
    format: StreamingFormat,
) -> (http::HeaderMap, BoxStream<'static, Result<Bytes, String>>)
where
    T: serde::Serialize + Send + 'static,
{
    let bytes_stream: BoxStream<'static, Result<Bytes, String>> = match format {
        StreamingFormat::IncrementalDelivery => Box::pin(
            payload_stream
                .map(|payload| -> Result<Bytes, String> {
                    let json = serde_json::to_string(&payload).map_err(|err| err.to_string())?;
                    Ok(Bytes::from(format!(
                        "--{MULTIPART_BOUNDARY}\r\ncontent-type: application/json\r\n\r\n{json}\r\n"
                    )))
                })
                .chain(stream::once(async {
                    Ok(Bytes::from(format!("--{MULTIPART_BOUNDARY}--\r\n")))
                })),
        ),
        StreamingFormat::GraphqlOverSse => Box::pin(
            payload_stream
                .map(|payload| -> Result<Bytes, String> {
                    let json = serde_json::to_string(&payload).map_err(|err| err.to_string())?;
                    Ok(Bytes::from(format!("event: next\ndata: {json}\n\n")))
                })
                // The GraphQL over SSE spec only asks for the event name on
                // the complete event, but the SSE spec tells clients to drop
                // events with an empty data buffer. So the data is null.
                .chain(stream::once(async {
                    Ok(Bytes::from("event: complete\ndata: null\n\n"))
                })),
        ),
    };

    let mut headers = http::HeaderMap::new();
    headers.typed_insert(headers::CacheControl::new().with_no_cache());
    headers.typed_insert(headers::ContentType::from(match format {
        StreamingFormat::IncrementalDelivery => format!("multipart/mixed; boundary=\"{MULTIPART_BOUNDARY}\"")
            .parse::<mime::Mime>()
            .expect("valid mime"),
        StreamingFormat::GraphqlOverSse => mime::TEXT_EVENT_STREAM,
    }));

    (headers, bytes_stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(stream: BoxStream<'static, Result<Bytes, String>>) -> Vec<String> {
        stream
            .map(|fragment| String::from_utf8(fragment.unwrap().to_vec()).unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn incremental_delivery_frames_each_payload_and_terminates() {
        let payloads = stream::iter(vec![
            serde_json::json!({"data": {"a": 1}, "hasNext": true}),
            serde_json::json!({"incremental": [], "hasNext": false}),
        ]);
        let (headers, stream) = encode_response_stream(payloads, StreamingFormat::IncrementalDelivery);

        assert_eq!(
            headers.get(http::header::CONTENT_TYPE).unwrap(),
            "multipart/mixed; boundary=\"-\""
        );
        assert_eq!(headers.get(http::header::CACHE_CONTROL).unwrap(), "no-cache");

        let fragments = collect(stream).await;
        assert_eq!(
            fragments,
            vec![
                "---\r\ncontent-type: application/json\r\n\r\n{\"data\":{\"a\":1},\"hasNext\":true}\r\n",
                "---\r\ncontent-type: application/json\r\n\r\n{\"incremental\":[],\"hasNext\":false}\r\n",
                "-----\r\n",
            ]
        );
    }

    #[tokio::test]
    async fn sse_sends_next_events_then_a_complete_event() {
        let payloads = stream::iter(vec![serde_json::json!({"data": {"a": 1}})]);
        let (headers, stream) = encode_response_stream(payloads, StreamingFormat::GraphqlOverSse);

        assert_eq!(headers.get(http::header::CONTENT_TYPE).unwrap(), "text/event-stream");

        let fragments = collect(stream).await;
        assert_eq!(
            fragments,
            vec![
                "event: next\ndata: {\"data\":{\"a\":1}}\n\n",
                "event: complete\ndata: null\n\n",
            ]
        );
    }
}
