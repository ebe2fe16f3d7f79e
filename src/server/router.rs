use crate::backend::BackendRegistry;
use crate::config::Config;
use crate::error::ConfigError;
use crate::server::routes::notes;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared, read-only request state. The registry is built before the first
/// request and never changes afterwards.
#[derive(Clone)]
pub struct NotesState {
    pub registry: Arc<BackendRegistry>,
    pub login_header: HeaderName,
    pub debug_form: bool,
}

impl NotesState {
    pub fn new(
        registry: Arc<BackendRegistry>,
        login_header: HeaderName,
        debug_form: bool,
    ) -> Self {
        Self {
            registry,
            login_header,
            debug_form,
        }
    }

    pub fn from_config(registry: Arc<BackendRegistry>, cfg: &Config) -> Result<Self, ConfigError> {
        let raw = cfg.identity.login_header.trim();
        let login_header = HeaderName::from_bytes(raw.as_bytes()).map_err(|_| {
            ConfigError::InvalidLoginHeader {
                value: raw.to_string(),
            }
        })?;
        Ok(Self::new(registry, login_header, cfg.basic.debug_form))
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id` for easier correlation, even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let path = uri.path();
    let protocol = format_http_version(version);

    macro_rules! log_request {
        ($level:ident) => {
            $level!(
                status = status.as_u16(),
                request_id = %request_id,
                method = %method,
                protocol,
                path,
                latency_ms,
                user_agent = %user_agent,
                "Handled note request"
            )
        };
    }

    if status.is_server_error() {
        log_request!(error);
    } else if status.is_client_error() {
        log_request!(warn);
    } else {
        log_request!(info);
    }

    resp
}

pub fn notes_router(state: NotesState) -> Router {
    Router::new()
        .merge(notes::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
