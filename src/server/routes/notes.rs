use super::{debug_form, extract};
use crate::error::NoteError;
use crate::server::guards::identity::UpstreamLogin;
use crate::server::respond::legacy_json;
use crate::server::router::NotesState;
use axum::{
    Form, Router,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::Response,
    routing::get,
};
use mapnotes_schema::{BackendList, StoreNoteForm, StoreResponse};
use tracing::debug;

pub fn router() -> Router<NotesState> {
    Router::new()
        .route("/note/backends", get(list_backends_handler))
        .route(
            "/note/backend/{backend_id}",
            get(debug_form::debug_form_handler).post(store_note_handler),
        )
}

/// GET /note/backends
pub(super) async fn list_backends_handler(State(state): State<NotesState>) -> Response {
    let list: BackendList = state.registry.list().map(|b| b.describe()).collect();
    legacy_json(StatusCode::OK, &list)
}

/// POST /note/backend/{backend_id}
///
/// The backend is resolved before the body is looked at: an unknown id is
/// a 404 without any validation or database access. Repeated fields keep
/// their first value.
pub(super) async fn store_note_handler(
    State(state): State<NotesState>,
    Path(backend_id): Path<String>,
    UpstreamLogin(login): UpstreamLogin,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, NoteError> {
    let backend = state.registry.lookup(&backend_id)?;

    let Form(pairs) = form.map_err(|rejection| NoteError::Validation {
        field: "body",
        reason: rejection.body_text(),
    })?;
    let note = extract::note_from_form(StoreNoteForm::from_pairs(pairs), login)?;

    backend.store(&note).await?;

    debug!(
        backend = %backend.id(),
        follow_up = note.follow_up(),
        has_email = note.email().is_some(),
        has_login = note.login().is_some(),
        "Note stored"
    );
    Ok(legacy_json(StatusCode::OK, &StoreResponse::stored()))
}
