//! In-process mock of the target web application
//!
//! Serves just enough surface for the HTTP checks: a login page with
//! configurable security headers, a wildcard of protected API routes,
//! and a login endpoint with optional rate limiting.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

#[derive(Default)]
pub struct TargetOptions {
    /// Return 429 for login requests after this many have been counted
    pub rate_limit_after: Option<u32>,
    /// Security headers to leave off the login page response
    pub omit_headers: Vec<&'static str>,
}

#[derive(Clone)]
struct AppState {
    login_posts: Arc<AtomicU32>,
    options: Arc<TargetOptions>,
}

pub struct MockTarget {
    pub base_url: String,
    login_posts: Arc<AtomicU32>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockTarget {
    pub async fn spawn(options: TargetOptions) -> Self {
        let login_posts = Arc::new(AtomicU32::new(0));
        let state = AppState {
            login_posts: login_posts.clone(),
            options: Arc::new(options),
        };

        let app = Router::new()
            .route("/login", get(login_page))
            .route("/api/auth/login", post(login_api))
            .route("/api/*rest", get(protected))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            login_posts,
            handle,
        }
    }

    /// How many non-empty login POSTs the server has seen
    pub fn login_posts(&self) -> u32 {
        self.login_posts.load(Ordering::SeqCst)
    }
}

impl Drop for MockTarget {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    for (name, value) in SECURITY_HEADERS {
        if !state.options.omit_headers.contains(name) {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
    }

    let body = Html(
        r#"<html><head><title>Login</title></head><body>
<form><input type="email" name="email"/><input type="password" name="password"/>
<button type="submit">Log in</button></form>
<a href="/register">Sign up</a>
</body></html>"#,
    );

    (headers, body)
}

async fn login_api(State(state): State<AppState>, body: Bytes) -> StatusCode {
    if body.is_empty() {
        return StatusCode::BAD_REQUEST;
    }

    let seen = state.login_posts.fetch_add(1, Ordering::SeqCst) + 1;
    match state.options.rate_limit_after {
        Some(limit) if seen > limit => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::UNAUTHORIZED,
    }
}

async fn protected() -> StatusCode {
    StatusCode::UNAUTHORIZED
}
