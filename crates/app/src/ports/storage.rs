//! Storage port: the device document collection.

use std::future::Future;

use trigger_domain::device_record::{DeviceRecord, StatusFlag};
use trigger_domain::error::TriggerError;
use trigger_domain::id::RecordId;
use trigger_domain::schedule::{Schedule, ScheduleEntry};
use trigger_domain::telemetry::{CurrentData, Sample};

/// Repository for [`DeviceRecord`] documents.
///
/// Operations that depend on prior state (toggles, appends) must be applied
/// atomically by the implementation. They return `None` when the record does
/// not exist instead of failing.
pub trait DeviceRecordRepository {
    /// Persist a new record under its already-assigned id.
    fn create(
        &self,
        record: DeviceRecord,
    ) -> impl Future<Output = Result<DeviceRecord, TriggerError>> + Send;

    /// Get a record by its identifier.
    fn get_by_id(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, TriggerError>> + Send;

    /// List every record in the collection.
    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, TriggerError>> + Send;

    /// Negate a status flag, returning its new value.
    fn toggle(
        &self,
        id: &RecordId,
        flag: StatusFlag,
    ) -> impl Future<Output = Result<Option<bool>, TriggerError>> + Send;

    /// Append one telemetry sample, returning the updated history.
    fn append_sample(
        &self,
        id: &RecordId,
        sample: Sample,
    ) -> impl Future<Output = Result<Option<CurrentData>, TriggerError>> + Send;

    /// Append one schedule entry, returning the updated schedule.
    fn append_schedule_entry(
        &self,
        id: &RecordId,
        entry: ScheduleEntry,
    ) -> impl Future<Output = Result<Option<Schedule>, TriggerError>> + Send;

    /// Delete a record. Returns `false` when nothing was removed.
    fn delete(&self, id: &RecordId) -> impl Future<Output = Result<bool, TriggerError>> + Send;
}
