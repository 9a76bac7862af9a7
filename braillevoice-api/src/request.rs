use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted_headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                // Bearer tokens must never reach logs.
                let sensitive = k.eq_ignore_ascii_case("authorization");
                let v = if sensitive { "[REDACTED]".into() } else { v.clone() };
                (k.clone(), v)
            })
            .collect();

        let body_summary = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
            Body::MultipartFormData { boundary, bytes } => {
                format!("MultipartFormData(boundary={}, bytes_len={})", boundary, bytes.len())
            }
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &redacted_headers)
            .field("body", &body_summary)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
    MultipartFormData { boundary: String, bytes: Vec<u8> },
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn bearer_header(token: &str) -> (String, String) {
    ("Authorization".into(), format!("Bearer {token}"))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Validates and normalizes an API base URL (scheme + host required).
pub fn ensure_base_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw).with_context(|| format!("invalid API base url: {raw}"))?;
    anyhow::ensure!(url.has_host(), "API base url has no host: {raw}");
    Ok(url.to_string().trim_end_matches('/').to_string())
}

/// Resolves a server-relative audio path against the API base, matching how
/// the result audio player sources its file.
pub fn absolute_audio_url(base: &str, audio_url: &str) -> anyhow::Result<String> {
    let base = Url::parse(base).with_context(|| format!("invalid API base url: {base}"))?;
    let joined = base
        .join(audio_url)
        .with_context(|| format!("invalid audio url: {audio_url}"))?;
    Ok(joined.to_string())
}
