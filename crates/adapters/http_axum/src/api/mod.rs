//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod items;

use axum::Router;
use axum::routing::{get, post, put};

use trigger_app::ports::{Clock, DeviceRecordRepository};

use crate::state::AppState;

/// Build the `/items` routes.
pub fn routes<R, C>() -> Router<AppState<R, C>>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/items",
            get(items::list::<R, C>).post(items::create::<R, C>),
        )
        .route(
            "/items/{id}",
            get(items::get::<R, C>).delete(items::delete::<R, C>),
        )
        .route(
            "/items/{id}/onStatus",
            put(items::toggle_on_status::<R, C>),
        )
        .route(
            "/items/{id}/abnormalStatus",
            put(items::toggle_abnormal_status::<R, C>),
        )
        .route(
            "/items/{id}/currentData",
            post(items::append_current_data::<R, C>),
        )
        .route("/items/{id}/schedule", post(items::append_schedule::<R, C>))
}
