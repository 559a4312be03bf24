//! Axum router assembly.

use axum::Json;
use axum::Router;
use axum::routing::get;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use trigger_app::ports::{Clock, DeviceRecordRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the greeting at `/`, a liveness probe at `/health` and the record
/// API under `/items`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, C>(state: AppState<R, C>) -> Router
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(crate::api::routes::<R, C>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Greeting {
    #[serde(rename = "Hello")]
    hello: &'static str,
}

async fn root() -> Json<Greeting> {
    Json(Greeting { hello: "World" })
}

async fn health_check() -> &'static str {
    "OK"
}
