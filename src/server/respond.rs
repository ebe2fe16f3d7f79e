use axum::{
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// ExtJS `BasicForm` submissions only accept their result as `text/html`.
const LEGACY_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serializes `body` as JSON but labels it `text/html` for the legacy map
/// client. Angle brackets are emitted as `\u003c`/`\u003e` so that a
/// reflected value can never form markup.
pub fn legacy_json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let json = match serde_json::to_string(body) {
        Ok(json) => json.replace('<', "\\u003c").replace('>', "\\u003e"),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("serialize failed: {e}"))
                .into_response();
        }
    };

    let mut resp = (status, json).into_response();
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(LEGACY_CONTENT_TYPE));
    resp
}
