use indexmap::IndexMap;

/// The structured request body a body-parsing layer is expected to have
/// stored in the request extensions before the bridge runs. The bridge never
/// parses raw bytes itself.
#[derive(Debug, Clone)]
pub struct ParsedBody(pub serde_json::Value);

#[derive(Debug, thiserror::Error)]
#[error("the request extensions carry no parsed body")]
pub struct MissingParsedBody;

impl ParsedBody {
    pub fn from_extensions(extensions: &http::Extensions) -> Result<&Self, MissingParsedBody> {
        extensions.get::<Self>().ok_or(MissingParsedBody)
    }
}

/// The normalized, transport-agnostic request record passed to the execution
/// engine. Built once per inbound request and dropped after the engine call
/// returns.
#[derive(Debug)]
pub struct CanonicalRequest {
    /// Always upper-case.
    pub method: String,
    /// Insertion-ordered with unique keys. Keys are lower-case because
    /// `http::HeaderName` already guarantees it, we don't re-validate.
    /// Multi-valued headers are collapsed into one `", "`-joined value.
    pub headers: IndexMap<String, String>,
    /// The query string including its leading `?`, or `""` when the URI has
    /// no query component. Never absent, so the engine sees a stable type.
    pub search: String,
    pub body: serde_json::Value,
}

impl CanonicalRequest {
    /// The body is passed through as-is from the parsed-body extension, no
    /// re-serialization happens on this path.
    pub fn from_parts(parts: &http::request::Parts, body: serde_json::Value) -> Self {
        CanonicalRequest {
            method: parts.method.as_str().to_ascii_uppercase(),
            headers: collapse_headers(&parts.headers),
            search: parts
                .uri
                .query()
                .map(|query| format!("?{query}"))
                .unwrap_or_default(),
            body,
        }
    }
}

fn collapse_headers(headers: &http::HeaderMap) -> IndexMap<String, String> {
    let mut out = IndexMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        // Values that aren't valid UTF-8 can't be represented in the
        // canonical map and are skipped. A key with no representable value
        // at all is left out entirely.
        let values = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>();
        if !values.is_empty() {
            out.insert(name.as_str().to_string(), values.join(", "));
        }
    }
    out
}
