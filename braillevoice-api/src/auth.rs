use crate::request::{Body, HttpRequest, bearer_header, join_url};
use serde_json::json;

pub fn build_login_request(base_url: &str, username: &str, password: &str) -> HttpRequest {
    json_post(
        join_url(base_url, "/auth/login"),
        json!({ "username": username, "password": password }),
    )
}

pub fn build_register_request(
    base_url: &str,
    username: &str,
    email: &str,
    password: &str,
) -> HttpRequest {
    json_post(
        join_url(base_url, "/auth/register"),
        json!({ "username": username, "email": email, "password": password }),
    )
}

pub fn build_logout_request(base_url: &str, token: &str) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url: join_url(base_url, "/auth/logout"),
        headers: vec![bearer_header(token)],
        body: Body::Empty,
    }
}

pub fn build_check_request(base_url: &str, token: &str) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: join_url(base_url, "/auth/check"),
        headers: vec![bearer_header(token)],
        body: Body::Empty,
    }
}

fn json_post(url: String, payload: serde_json::Value) -> HttpRequest {
    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![("Content-Type".into(), "application/json".into())],
        body: Body::Json(payload.to_string()),
    }
}
