use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::error::CheckinError;
use crate::handlers::{connect, dashboard, healthz, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    with_layers(routes()).with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/connect", post(connect))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

fn with_layers(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    CheckinError::Internal(format!("handler panicked: {detail}")).into_response()
}
