use crate::server::router::NotesState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// GET /note/backend/{backend_id}
///
/// Bare HTML form posting to the same URL, for exercising a backend without
/// the map client. Only served when `basic.debug_form` is enabled.
pub(super) async fn debug_form_handler(
    State(state): State<NotesState>,
    Path(backend_id): Path<String>,
) -> Response {
    if !state.debug_form {
        return StatusCode::NOT_FOUND.into_response();
    }

    match state.registry.lookup(&backend_id) {
        Ok(backend) => Html(render_form(&backend.to_string())).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

fn render_form(title: &str) -> String {
    format!(
        concat!(
            "{}<br>",
            "<form method=\"POST\">",
            "Follow up : <input type=\"checkbox\" name=\"followup\" value=\"true\"><br>",
            "Email : <input type=\"text\" name=\"email\"><br>",
            "Comment : <input type=\"text\" name=\"comment\"><br>",
            "Map context : <input type=\"text\" name=\"map_context\"><br>",
            "Latitude : <input type=\"text\" name=\"latitude\"><br>",
            "Longitude : <input type=\"text\" name=\"longitude\"><br>",
            "<input type=\"submit\" value=\"Store\">",
            "</form>"
        ),
        escape_html(title)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
