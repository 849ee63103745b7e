#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use roomescape::{app::build_app, auth::services::AuthService, config::AdminSeed, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Fresh in-memory database with an administrator account.
    pub async fn spawn() -> Self {
        let state = AppState::in_memory().await.expect("in-memory state");
        AuthService::new(&state.db)
            .ensure_admin(&AdminSeed {
                email: ADMIN_EMAIL.into(),
                password: ADMIN_PASSWORD.into(),
                name: "admin".into(),
            })
            .await
            .expect("seed admin");
        let router = build_app(state.clone());
        Self { state, router }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Logs in and returns the `token=...` pair to send back as a `Cookie` header.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let res = self
            .send(
                Method::POST,
                "/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {:?}", res.body);
        let set_cookie = res
            .headers
            .get(header::SET_COOKIE)
            .expect("login sets a cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn admin_cookie(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn create_time(&self, cookie: &str, start_at: &str) -> i64 {
        let res = self
            .send(
                Method::POST,
                "/times",
                Some(json!({ "startAt": start_at })),
                Some(cookie),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_i64().unwrap()
    }

    pub async fn create_theme(&self, cookie: &str, name: &str) -> i64 {
        let res = self
            .send(
                Method::POST,
                "/themes",
                Some(json!({
                    "name": name,
                    "description": format!("{} description", name),
                    "thumbnail": format!("https://img.example/{}.png", name),
                })),
                Some(cookie),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_i64().unwrap()
    }
}
