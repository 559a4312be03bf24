//! JSON REST handlers for device records (`/items`).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use trigger_app::ports::{Clock, DeviceRecordRepository};
use trigger_domain::device_record::{DeviceRecord, NewDeviceRecord, StatusFlag};
use trigger_domain::id::RecordId;
use trigger_domain::schedule::{Schedule, ScheduleSubmission};
use trigger_domain::telemetry::{CurrentData, Measurement};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a record. Any client-supplied `id` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub on_status: bool,
    pub location: String,
    #[serde(default)]
    pub abnormal_status: Option<bool>,
    #[serde(default)]
    pub current_data: Option<CurrentData>,
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

impl From<CreateItemRequest> for NewDeviceRecord {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            on_status: req.on_status,
            location: req.location,
            abnormal_status: req.abnormal_status,
            current_data: req.current_data,
            schedule: req.schedule,
        }
    }
}

/// `{"items": [...]}`
#[derive(Serialize)]
pub struct ItemsBody {
    pub items: Vec<DeviceRecord>,
}

/// `{"item": {...}}`
#[derive(Serialize)]
pub struct ItemBody {
    pub item: DeviceRecord,
}

/// `{"success": ...}`
#[derive(Serialize)]
pub struct SuccessBody<T> {
    pub success: T,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ItemsBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ItemBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    /// Body stays the plain acknowledgement; the new id travels in `Location`.
    Created(RecordId),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(id) => (
                [(header::LOCATION, format!("/items/{id}"))],
                Json(SuccessBody {
                    success: "Item created",
                }),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the toggle and delete endpoints.
pub enum AckResponse {
    Updated,
    Deleted,
}

impl IntoResponse for AckResponse {
    fn into_response(self) -> Response {
        let success = match self {
            Self::Updated => "Item updated",
            Self::Deleted => "Item deleted",
        };
        Json(SuccessBody { success }).into_response()
    }
}

/// Possible responses from the current-data append endpoint.
pub enum CurrentDataResponse {
    /// Carries the log as it was before the append.
    Previous(Json<SuccessBody<CurrentData>>),
}

impl IntoResponse for CurrentDataResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Previous(json) => json.into_response(),
        }
    }
}

/// Possible responses from the schedule append endpoint.
pub enum ScheduleResponse {
    Updated(Json<SuccessBody<Schedule>>),
}

impl IntoResponse for ScheduleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Updated(json) => json.into_response(),
        }
    }
}

/// `GET /items`
pub async fn list<R, C>(State(state): State<AppState<R, C>>) -> Result<ListResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let items = state.record_service.list_records().await?;
    Ok(ListResponse::Ok(Json(ItemsBody { items })))
}

/// `GET /items/:id`
pub async fn get<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let item = state.record_service.get_record(&RecordId::from(id)).await?;
    Ok(GetResponse::Ok(Json(ItemBody { item })))
}

/// `POST /items`
pub async fn create<R, C>(
    State(state): State<AppState<R, C>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let created = state.record_service.create_record(req.into()).await?;
    Ok(CreateResponse::Created(created.id))
}

async fn toggle<R, C>(
    state: &AppState<R, C>,
    id: String,
    flag: StatusFlag,
) -> Result<AckResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state
        .record_service
        .toggle_status(&RecordId::from(id), flag)
        .await?;
    Ok(AckResponse::Updated)
}

/// `PUT /items/:id/onStatus`
pub async fn toggle_on_status<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<AckResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    toggle(&state, id, StatusFlag::On).await
}

/// `PUT /items/:id/abnormalStatus`
pub async fn toggle_abnormal_status<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<AckResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    toggle(&state, id, StatusFlag::Abnormal).await
}

/// `DELETE /items/:id`
pub async fn delete<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<AckResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state
        .record_service
        .delete_record(&RecordId::from(id))
        .await?;
    Ok(AckResponse::Deleted)
}

/// `POST /items/:id/currentData`
pub async fn append_current_data<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
    Json(measurement): Json<Measurement>,
) -> Result<CurrentDataResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let previous = state
        .record_service
        .append_current_data(&RecordId::from(id), measurement)
        .await?;
    Ok(CurrentDataResponse::Previous(Json(SuccessBody {
        success: previous,
    })))
}

/// `POST /items/:id/schedule`
pub async fn append_schedule<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
    Json(submission): Json<ScheduleSubmission>,
) -> Result<ScheduleResponse, ApiError>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedule = state
        .record_service
        .append_schedule(&RecordId::from(id), submission)
        .await?;
    Ok(ScheduleResponse::Updated(Json(SuccessBody {
        success: schedule,
    })))
}
