//! Device record service: use-cases for the device collection.

use trigger_domain::device_record::{DeviceRecord, NewDeviceRecord, StatusFlag};
use trigger_domain::error::{NotFoundError, TriggerError};
use trigger_domain::id::RecordId;
use trigger_domain::schedule::{Schedule, ScheduleSubmission};
use trigger_domain::telemetry::{CurrentData, Measurement, Sample};
use trigger_domain::time::Stamp;

use crate::ports::{Clock, DeviceRecordRepository, SystemClock};

/// Application service for device record operations.
pub struct DeviceRecordService<R, C = SystemClock> {
    repo: R,
    clock: C,
}

fn not_found(id: &RecordId) -> TriggerError {
    NotFoundError {
        entity: "DeviceRecord",
        id: id.to_string(),
    }
    .into()
}

impl<R: DeviceRecordRepository> DeviceRecordService<R> {
    /// Create a new service backed by the given repository and the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R, C> DeviceRecordService<R, C>
where
    R: DeviceRecordRepository,
    C: Clock,
{
    /// Create a new service stamping telemetry with `clock`.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    fn stamp(&self) -> Stamp {
        Stamp::at(self.clock.now())
    }

    /// List all records, in whatever order the store yields them.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_records(&self) -> Result<Vec<DeviceRecord>, TriggerError> {
        self.repo.get_all().await
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_record(&self, id: &RecordId) -> Result<DeviceRecord, TriggerError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a record under a fresh server-assigned id.
    ///
    /// Omitted optionals get their defaults; the telemetry log is seeded with
    /// a placeholder sample stamped now.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, new), fields(record_name = %new.name))]
    pub async fn create_record(&self, new: NewDeviceRecord) -> Result<DeviceRecord, TriggerError> {
        let record = new.into_record(RecordId::new(), self.stamp());
        let created = self.repo.create(record).await?;
        tracing::debug!(id = %created.id, "device record created");
        Ok(created)
    }

    /// Negate a status flag, returning its new value.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_status(
        &self,
        id: &RecordId,
        flag: StatusFlag,
    ) -> Result<bool, TriggerError> {
        self.repo
            .toggle(id, flag)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Permanently delete a record.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_record(&self, id: &RecordId) -> Result<(), TriggerError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    /// Stamp a measurement with the current wall clock and append it to the
    /// record's telemetry log.
    ///
    /// Returns the log as it was before this sample was appended.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn append_current_data(
        &self,
        id: &RecordId,
        measurement: Measurement,
    ) -> Result<CurrentData, TriggerError> {
        let sample = Sample::stamped(self.stamp(), measurement);
        let mut data = self
            .repo
            .append_sample(id, sample)
            .await?
            .ok_or_else(|| not_found(id))?;
        data.pop();
        Ok(data)
    }

    /// Append a schedule entry, returning the updated schedule.
    ///
    /// Existence is checked before the submission is validated, so an unknown
    /// id reports not-found even when keys are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotFound`] when no record with `id` exists,
    /// [`TriggerError::Validation`] when `day`, `timeOn` or `timeOff` is
    /// missing, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn append_schedule(
        &self,
        id: &RecordId,
        submission: ScheduleSubmission,
    ) -> Result<Schedule, TriggerError> {
        let entry = match submission.complete() {
            Ok(entry) => entry,
            Err(err) => {
                if self.repo.get_by_id(id).await?.is_none() {
                    return Err(not_found(id));
                }
                return Err(err.into());
            }
        };

        self.repo
            .append_schedule_entry(id, entry)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use trigger_domain::error::ValidationError;
    use trigger_domain::schedule::ScheduleEntry;
    use trigger_domain::telemetry::Reading;
    use trigger_domain::time::WallClock;

    #[derive(Default)]
    struct InMemoryDeviceRecordRepo {
        store: Mutex<Vec<DeviceRecord>>,
    }

    impl InMemoryDeviceRecordRepo {
        fn with_record<T>(
            &self,
            id: &RecordId,
            f: impl FnOnce(&mut DeviceRecord) -> T,
        ) -> Option<T> {
            let mut store = self.store.lock().unwrap();
            store.iter_mut().find(|r| &r.id == id).map(f)
        }
    }

    impl DeviceRecordRepository for InMemoryDeviceRecordRepo {
        fn create(
            &self,
            record: DeviceRecord,
        ) -> impl Future<Output = Result<DeviceRecord, TriggerError>> + Send {
            self.store.lock().unwrap().push(record.clone());
            async { Ok(record) }
        }

        fn get_by_id(
            &self,
            id: &RecordId,
        ) -> impl Future<Output = Result<Option<DeviceRecord>, TriggerError>> + Send {
            let result = self.with_record(id, |r| r.clone());
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, TriggerError>> + Send {
            let result = self.store.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn toggle(
            &self,
            id: &RecordId,
            flag: StatusFlag,
        ) -> impl Future<Output = Result<Option<bool>, TriggerError>> + Send {
            let result = self.with_record(id, |r| r.toggle(flag));
            async move { Ok(result) }
        }

        fn append_sample(
            &self,
            id: &RecordId,
            sample: Sample,
        ) -> impl Future<Output = Result<Option<CurrentData>, TriggerError>> + Send {
            let result = self.with_record(id, |r| {
                r.current_data.push(sample);
                r.current_data.clone()
            });
            async { Ok(result) }
        }

        fn append_schedule_entry(
            &self,
            id: &RecordId,
            entry: ScheduleEntry,
        ) -> impl Future<Output = Result<Option<Schedule>, TriggerError>> + Send {
            let result = self.with_record(id, |r| {
                r.schedule.push(entry);
                r.schedule.clone()
            });
            async { Ok(result) }
        }

        fn delete(&self, id: &RecordId) -> impl Future<Output = Result<bool, TriggerError>> + Send {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|r| &r.id != id);
            let removed = store.len() != before;
            async move { Ok(removed) }
        }
    }

    struct FixedClock(WallClock);

    impl Clock for FixedClock {
        fn now(&self) -> WallClock {
            self.0
        }
    }

    fn make_service() -> DeviceRecordService<InMemoryDeviceRecordRepo, FixedClock> {
        let clock = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 7, 0)
            .unwrap();
        DeviceRecordService::with_clock(InMemoryDeviceRecordRepo::default(), FixedClock(clock))
    }

    fn sensor() -> NewDeviceRecord {
        NewDeviceRecord {
            name: "Sensor1".to_string(),
            on_status: true,
            location: "Roof".to_string(),
            ..NewDeviceRecord::default()
        }
    }

    fn full_submission() -> ScheduleSubmission {
        ScheduleSubmission {
            day: Some(Some("Monday".to_string())),
            time_on: Some(Some("08:00".to_string())),
            time_off: Some(Some("18:00".to_string())),
        }
    }

    #[tokio::test]
    async fn should_store_defaults_when_creating_minimal_record() {
        let svc = make_service();
        let created = svc.create_record(sensor()).await.unwrap();

        let fetched = svc.get_record(&created.id).await.unwrap();
        assert!(!fetched.abnormal_status);
        assert_eq!(fetched.current_data.len(), 1);
        assert_eq!(fetched.schedule.len(), 1);
        assert_eq!(fetched.current_data.samples()[0].time, "14:07");
        assert_eq!(fetched.current_data.samples()[0].date, "18/10/2026");
    }

    #[tokio::test]
    async fn should_assign_distinct_ids_to_each_record() {
        let svc = make_service();
        let a = svc.create_record(sensor()).await.unwrap();
        let b = svc.create_record(sensor()).await.unwrap();
        assert_ne!(a.id, b.id);

        let all = svc.list_records().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_return_not_found_when_record_missing() {
        let svc = make_service();
        let result = svc.get_record(&RecordId::new()).await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_restore_on_status_when_toggled_twice() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;

        assert!(!svc.toggle_status(&id, StatusFlag::On).await.unwrap());
        assert!(svc.toggle_status(&id, StatusFlag::On).await.unwrap());

        let fetched = svc.get_record(&id).await.unwrap();
        assert!(fetched.on_status);
    }

    #[tokio::test]
    async fn should_toggle_abnormal_status_independently() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;

        assert!(svc.toggle_status(&id, StatusFlag::Abnormal).await.unwrap());

        let fetched = svc.get_record(&id).await.unwrap();
        assert!(fetched.abnormal_status);
        assert!(fetched.on_status);
    }

    #[tokio::test]
    async fn should_return_not_found_when_toggling_missing_record() {
        let svc = make_service();
        let result = svc.toggle_status(&RecordId::new(), StatusFlag::On).await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_record() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;

        svc.delete_record(&id).await.unwrap();

        let result = svc.get_record(&id).await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_record() {
        let svc = make_service();
        let result = svc.delete_record(&RecordId::new()).await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_append_stamped_sample_and_return_previous_log() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;

        let previous = svc
            .append_current_data(
                &id,
                Measurement {
                    voltage: Reading::from_f64(12.1),
                    ..Measurement::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(previous.len(), 1);

        let data = svc.get_record(&id).await.unwrap().current_data;
        assert_eq!(data.len(), 2);
        let last = &data.samples()[1];
        assert_eq!(last.voltage, Reading::from_f64(12.1));
        assert!(last.current.is_none());
        assert!(last.power.is_none());
        assert_eq!(last.time, "14:07");
        assert_eq!(last.date, "18/10/2026");
    }

    #[tokio::test]
    async fn should_return_not_found_when_appending_sample_to_missing_record() {
        let svc = make_service();
        let result = svc
            .append_current_data(&RecordId::new(), Measurement::default())
            .await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_append_schedule_entry_and_return_updated_schedule() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;

        let schedule = svc.append_schedule(&id, full_submission()).await.unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.entries()[1].day.as_deref(), Some("Monday"));
    }

    #[tokio::test]
    async fn should_leave_schedule_unchanged_when_time_off_missing() {
        let svc = make_service();
        let id = svc.create_record(sensor()).await.unwrap().id;
        let mut submission = full_submission();
        submission.time_off = None;

        let result = svc.append_schedule(&id, submission).await;
        assert!(matches!(
            result,
            Err(TriggerError::Validation(ValidationError::MissingScheduleKeys(ref keys)))
                if keys == &vec!["timeOff"]
        ));

        let fetched = svc.get_record(&id).await.unwrap();
        assert_eq!(fetched.schedule.len(), 1);
    }

    #[tokio::test]
    async fn should_report_not_found_before_missing_keys() {
        let svc = make_service();
        let result = svc
            .append_schedule(&RecordId::new(), ScheduleSubmission::default())
            .await;
        assert!(matches!(result, Err(TriggerError::NotFound(_))));
    }
}
