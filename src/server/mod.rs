pub mod guards;
pub mod respond;
pub mod router;
pub mod routes;

use router::{NotesState, notes_router};
use std::future::Future;
use tokio::net::TcpListener;

/// Serves `state` on `listener` until `shutdown` resolves, then closes every
/// backend store, also when serving failed.
pub async fn serve_until<F>(
    listener: TcpListener,
    state: NotesState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry = state.registry.clone();
    let served = axum::serve(listener, notes_router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    registry.close().await;
    served
}
