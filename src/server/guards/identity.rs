use crate::server::router::NotesState;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tracing::warn;

/// Login asserted by the fronting security proxy, if any.
///
/// Read only from the configured identity header; request bodies can never
/// set it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamLogin(pub Option<String>);

impl FromRequestParts<NotesState> for UpstreamLogin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &NotesState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(&state.login_header) else {
            return Ok(UpstreamLogin(None));
        };

        match value.to_str() {
            Ok(login) => Ok(UpstreamLogin(Some(login.to_string()))),
            Err(_) => {
                warn!(
                    header = %state.login_header,
                    "Ignoring identity header with non-visible-ASCII value"
                );
                Ok(UpstreamLogin(None))
            }
        }
    }
}
