//! Shared application state for axum handlers.

use std::sync::Arc;

use trigger_app::ports::{Clock, DeviceRecordRepository, SystemClock};
use trigger_app::services::device_record_service::DeviceRecordService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and clock to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrapper is cloned.
pub struct AppState<R, C = SystemClock> {
    /// Device record service.
    pub record_service: Arc<DeviceRecordService<R, C>>,
}

impl<R, C> Clone for AppState<R, C> {
    fn clone(&self) -> Self {
        Self {
            record_service: Arc::clone(&self.record_service),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: DeviceRecordRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(record_service: DeviceRecordService<R, C>) -> Self {
        Self {
            record_service: Arc::new(record_service),
        }
    }
}
