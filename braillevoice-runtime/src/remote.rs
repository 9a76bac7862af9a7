use crate::session::{AuthGateway, AuthReply};
use anyhow::Context;
use async_trait::async_trait;
use braillevoice_api::auth::{
    build_check_request, build_login_request, build_logout_request, build_register_request,
};
use braillevoice_api::convert::{CONVERT_TIMEOUT, build_convert_request, build_health_request};
use braillevoice_api::parse::{
    parse_auth_response, parse_check_response, parse_convert_response, parse_error_detail,
};
use braillevoice_api::request::{absolute_audio_url, ensure_base_url};
use braillevoice_api::runtime::{execute, execute_with_timeout};
use braillevoice_core::upload::SelectedFile;
use braillevoice_engine::traits::{BrailleConverter, ConvertReply};

/// The auth endpoint family over HTTP.
#[derive(Debug, Clone)]
pub struct ApiAuthGateway {
    base_url: String,
}

impl ApiAuthGateway {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self { base_url: ensure_base_url(base_url)? })
    }
}

#[async_trait]
impl AuthGateway for ApiAuthGateway {
    async fn login(&self, username: &str, password: &str) -> anyhow::Result<AuthReply> {
        let req = build_login_request(&self.base_url, username, password);
        let resp = execute(&req).await.context("login request")?;
        if resp.is_success() {
            let grant = parse_auth_response(&resp.body)?;
            Ok(AuthReply::Granted { token: grant.token, user: grant.user })
        } else {
            Ok(AuthReply::Denied {
                detail: parse_error_detail(&resp.body, "Login failed"),
            })
        }
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<AuthReply> {
        let req = build_register_request(&self.base_url, username, email, password);
        let resp = execute(&req).await.context("register request")?;
        if resp.is_success() {
            let grant = parse_auth_response(&resp.body)?;
            Ok(AuthReply::Granted { token: grant.token, user: grant.user })
        } else {
            Ok(AuthReply::Denied {
                detail: parse_error_detail(&resp.body, "Registration failed"),
            })
        }
    }

    async fn logout(&self, token: &str) -> anyhow::Result<()> {
        let req = build_logout_request(&self.base_url, token);
        let resp = execute(&req).await.context("logout request")?;
        anyhow::ensure!(resp.is_success(), "logout answered {}", resp.status);
        Ok(())
    }

    async fn check(&self, token: &str) -> anyhow::Result<bool> {
        let req = build_check_request(&self.base_url, token);
        let resp = execute(&req).await.context("check request")?;
        if !resp.is_success() {
            return Ok(false);
        }
        parse_check_response(&resp.body)
    }
}

/// The conversion endpoint over HTTP (multipart upload, long timeout).
#[derive(Debug, Clone)]
pub struct ApiBrailleConverter {
    base_url: String,
}

impl ApiBrailleConverter {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self { base_url: ensure_base_url(base_url)? })
    }
}

#[async_trait]
impl BrailleConverter for ApiBrailleConverter {
    async fn convert(&self, file: &SelectedFile) -> anyhow::Result<ConvertReply> {
        let req = build_convert_request(&self.base_url, file);
        let resp = execute_with_timeout(&req, CONVERT_TIMEOUT)
            .await
            .context("convert request")?;
        if resp.is_success() {
            let mut outcome = parse_convert_response(&resp.body)?;
            // The server answers with a relative audio path; the shell needs
            // a playable URL.
            if let Some(rel) = outcome.audio_url.take() {
                outcome.audio_url = Some(absolute_audio_url(&self.base_url, &rel)?);
            }
            Ok(ConvertReply::Recognized(outcome))
        } else {
            Ok(ConvertReply::Rejected {
                detail: parse_error_detail(&resp.body, "Conversion failed"),
            })
        }
    }
}

/// Startup liveness probe. Any non-2xx or transport failure means the
/// backend is unreachable.
pub async fn check_server_health(base_url: &str) -> anyhow::Result<()> {
    let base = ensure_base_url(base_url)?;
    let req = build_health_request(&base);
    let resp = execute(&req)
        .await
        .context("Unable to connect to the server")?;
    anyhow::ensure!(
        resp.is_success(),
        "Unable to connect to the server. Please ensure the backend is running at {base}"
    );
    Ok(())
}
