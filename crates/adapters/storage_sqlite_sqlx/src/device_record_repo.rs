//! `SQLite` implementation of [`DeviceRecordRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use trigger_app::ports::DeviceRecordRepository;
use trigger_domain::device_record::{DeviceRecord, StatusFlag};
use trigger_domain::error::TriggerError;
use trigger_domain::id::RecordId;
use trigger_domain::schedule::{Schedule, ScheduleEntry};
use trigger_domain::telemetry::{CurrentData, Sample};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`DeviceRecord`].
struct Wrapper(DeviceRecord);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<DeviceRecord> {
        value.map(|w| w.0)
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, sqlx::Error> {
    serde_json::from_str(text).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let on_status: bool = row.try_get("on_status")?;
        let location: String = row.try_get("location")?;
        let abnormal_status: bool = row.try_get("abnormal_status")?;
        let current_data: String = row.try_get("current_data")?;
        let schedule: String = row.try_get("schedule")?;

        Ok(Self(DeviceRecord {
            id: RecordId::from(id),
            name,
            description,
            on_status,
            location,
            abnormal_status,
            current_data: CurrentData::from_samples(decode_json(&current_data)?),
            schedule: Schedule::from_entries(decode_json(&schedule)?),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO iot_devices (id, name, description, on_status, location, abnormal_status, current_data, schedule)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM iot_devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM iot_devices ORDER BY rowid";
const DELETE_BY_ID: &str = "DELETE FROM iot_devices WHERE id = ?";

const TOGGLE_ON_STATUS: &str =
    "UPDATE iot_devices SET on_status = NOT on_status WHERE id = ? RETURNING on_status";
const TOGGLE_ABNORMAL_STATUS: &str = "UPDATE iot_devices SET abnormal_status = NOT abnormal_status WHERE id = ? RETURNING abnormal_status";

const APPEND_SAMPLE: &str = r"
    UPDATE iot_devices SET current_data = json_insert(current_data, '$[#]', json(?))
    WHERE id = ?
    RETURNING current_data
";

const APPEND_SCHEDULE_ENTRY: &str = r"
    UPDATE iot_devices SET schedule = json_insert(schedule, '$[#]', json(?))
    WHERE id = ?
    RETURNING schedule
";

/// `SQLite`-backed device record repository.
pub struct SqliteDeviceRecordRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRecordRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRecordRepository for SqliteDeviceRecordRepository {
    fn create(
        &self,
        record: DeviceRecord,
    ) -> impl Future<Output = Result<DeviceRecord, TriggerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let current_data =
                serde_json::to_string(record.current_data.samples()).map_err(StorageError::from)?;
            let schedule =
                serde_json::to_string(record.schedule.entries()).map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(record.id.as_str())
                .bind(&record.name)
                .bind(&record.description)
                .bind(record.on_status)
                .bind(&record.location)
                .bind(record.abnormal_status)
                .bind(current_data)
                .bind(schedule)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(record)
        }
    }

    fn get_by_id(
        &self,
        id: &RecordId,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, TriggerError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceRecord>, TriggerError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn toggle(
        &self,
        id: &RecordId,
        flag: StatusFlag,
    ) -> impl Future<Output = Result<Option<bool>, TriggerError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        let statement = match flag {
            StatusFlag::On => TOGGLE_ON_STATUS,
            StatusFlag::Abnormal => TOGGLE_ABNORMAL_STATUS,
        };
        async move {
            let value: Option<bool> = sqlx::query_scalar(statement)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(value)
        }
    }

    fn append_sample(
        &self,
        id: &RecordId,
        sample: Sample,
    ) -> impl Future<Output = Result<Option<CurrentData>, TriggerError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let sample = serde_json::to_string(&sample).map_err(StorageError::from)?;
            let log: Option<String> = sqlx::query_scalar(APPEND_SAMPLE)
                .bind(sample)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let data = log
                .map(|text| serde_json::from_str(&text).map(CurrentData::from_samples))
                .transpose()
                .map_err(StorageError::from)?;
            Ok(data)
        }
    }

    fn append_schedule_entry(
        &self,
        id: &RecordId,
        entry: ScheduleEntry,
    ) -> impl Future<Output = Result<Option<Schedule>, TriggerError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let entry = serde_json::to_string(&entry).map_err(StorageError::from)?;
            let log: Option<String> = sqlx::query_scalar(APPEND_SCHEDULE_ENTRY)
                .bind(entry)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let schedule = log
                .map(|text| serde_json::from_str(&text).map(Schedule::from_entries))
                .transpose()
                .map_err(StorageError::from)?;
            Ok(schedule)
        }
    }

    fn delete(&self, id: &RecordId) -> impl Future<Output = Result<bool, TriggerError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
