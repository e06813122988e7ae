/// The two streaming encodings a chunked response can be delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingFormat {
    /// `multipart/mixed` incremental delivery.
    IncrementalDelivery,
    /// GraphQL over Server-Sent Events (`text/event-stream`).
    GraphqlOverSse,
}

impl StreamingFormat {
    /// Picks the streaming format out of an `accept` header value, if the
    /// client asked for one.
    pub fn from_accept_header(value: &str) -> Option<Self> {
        value.split(',').find_map(|entry| {
            let mime = entry.trim().parse::<mime::Mime>().ok()?;
            match mime.essence_str() {
                "multipart/mixed" => Some(StreamingFormat::IncrementalDelivery),
                "text/event-stream" => Some(StreamingFormat::GraphqlOverSse),
                _ => None,
            }
        })
    }
}
