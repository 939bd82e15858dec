//! Router construction and server startup.

use crate::handlers;
use axum::routing::get;
use axum::Router;
use exercise_core::{ExerciseService, Result};
use tokio::net::TcpListener;

/// Shared request state: the service and, through it, the store connection
#[derive(Clone)]
pub struct AppState {
    pub service: ExerciseService,
}

impl AppState {
    pub fn new(service: ExerciseService) -> Self {
        Self { service }
    }
}

/// Build the `/exercises` router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/exercises",
            get(handlers::list_exercises).post(handlers::create_exercise),
        )
        .route(
            "/exercises/:id",
            get(handlers::get_exercise)
                .put(handlers::replace_exercise)
                .delete(handlers::delete_exercise),
        )
        .with_state(state)
}

/// Serve the API on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, service: ExerciseService) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(AppState::new(service))).await?;
    Ok(())
}
