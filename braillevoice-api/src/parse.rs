use anyhow::Context;
use braillevoice_core::types::{ConversionOutcome, UserAccount};
use serde::Deserialize;

/// A granted login/registration: the bearer token plus the account it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserAccount,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    user: UserAccount,
}

pub fn parse_auth_response(body: &[u8]) -> anyhow::Result<AuthGrant> {
    let resp: AuthResponse = serde_json::from_slice(body).context("decode auth JSON")?;
    Ok(AuthGrant {
        token: resp.access_token,
        user: resp.user,
    })
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    authenticated: bool,
}

pub fn parse_check_response(body: &[u8]) -> anyhow::Result<bool> {
    let resp: CheckResponse = serde_json::from_slice(body).context("decode check JSON")?;
    Ok(resp.authenticated)
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    text: String,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

pub fn parse_convert_response(body: &[u8]) -> anyhow::Result<ConversionOutcome> {
    let resp: ConvertResponse = serde_json::from_slice(body).context("decode convert JSON")?;
    Ok(ConversionOutcome {
        text: resp.text,
        confidence: resp.confidence,
        audio_url: resp.audio_url,
        duration: resp.duration,
    })
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<String>,
}

/// Extracts the server's `detail` message from an error body, falling back
/// to `fallback` when the body is missing, unparsable, or has no detail.
pub fn parse_error_detail(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_auth_grant() {
        let body = br#"{"access_token":"tok","user":{"username":"amina","email":"a@b.c"}}"#;
        let grant = parse_auth_response(body).unwrap();
        assert_eq!(grant.token, "tok");
        assert_eq!(grant.user.username, "amina");
    }

    #[test]
    fn parses_check_flag() {
        assert!(parse_check_response(br#"{"authenticated":true}"#).unwrap());
        assert!(!parse_check_response(br#"{"authenticated":false}"#).unwrap());
        assert!(parse_check_response(b"<html>").is_err());
    }

    #[test]
    fn parses_convert_result_with_optional_audio() {
        let body = r#"{"text":"আমার","confidence":0.93}"#.as_bytes();
        let outcome = parse_convert_response(body).unwrap();
        assert_eq!(outcome.confidence, 0.93);
        assert_eq!(outcome.audio_url, None);

        let body = br#"{"text":"x","confidence":0.5,"audio_url":"/static/a.wav","duration":4.2}"#;
        let outcome = parse_convert_response(body).unwrap();
        assert_eq!(outcome.audio_url.as_deref(), Some("/static/a.wav"));
        assert_eq!(outcome.duration, Some(4.2));
    }

    #[test]
    fn error_detail_is_verbatim_with_fallback() {
        assert_eq!(
            parse_error_detail(br#"{"detail":"Invalid credentials"}"#, "Login failed"),
            "Invalid credentials"
        );
        assert_eq!(parse_error_detail(b"<html>502</html>", "Login failed"), "Login failed");
        assert_eq!(parse_error_detail(br#"{"detail":""}"#, "Login failed"), "Login failed");
    }
}
