//! Device record: the persisted state of one physical IoT device.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::schedule::Schedule;
use crate::telemetry::CurrentData;
use crate::time::Stamp;

/// One document in the device collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub on_status: bool,
    pub location: String,
    pub abnormal_status: bool,
    pub current_data: CurrentData,
    pub schedule: Schedule,
}

impl DeviceRecord {
    /// Create a builder for constructing a [`DeviceRecord`].
    #[must_use]
    pub fn builder() -> DeviceRecordBuilder {
        DeviceRecordBuilder::default()
    }

    /// Negate a status flag in place, returning the new value.
    pub fn toggle(&mut self, flag: StatusFlag) -> bool {
        let slot = match flag {
            StatusFlag::On => &mut self.on_status,
            StatusFlag::Abnormal => &mut self.abnormal_status,
        };
        *slot = !*slot;
        *slot
    }
}

/// The two boolean flags a client may toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFlag {
    /// `onStatus`: device power state.
    On,
    /// `abnormalStatus`: fault flag.
    Abnormal,
}

/// Client-supplied fields of a record about to be created.
///
/// Anything left `None` is defaulted by [`NewDeviceRecord::into_record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDeviceRecord {
    pub name: String,
    pub description: Option<String>,
    pub on_status: bool,
    pub location: String,
    pub abnormal_status: Option<bool>,
    pub current_data: Option<CurrentData>,
    pub schedule: Option<Schedule>,
}

impl NewDeviceRecord {
    /// Assign an identity and fill defaults, seeding the telemetry log with
    /// a placeholder stamped at `stamp`.
    #[must_use]
    pub fn into_record(self, id: RecordId, stamp: Stamp) -> DeviceRecord {
        let mut builder = DeviceRecord::builder()
            .id(id)
            .name(self.name)
            .on_status(self.on_status)
            .location(self.location)
            .abnormal_status(self.abnormal_status.unwrap_or(false))
            .current_data(
                self.current_data
                    .unwrap_or_else(|| CurrentData::seeded(stamp)),
            )
            .schedule(self.schedule.unwrap_or_else(Schedule::seeded));
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

/// Step-by-step builder for [`DeviceRecord`].
#[derive(Debug, Default)]
pub struct DeviceRecordBuilder {
    id: Option<RecordId>,
    name: Option<String>,
    description: Option<String>,
    on_status: bool,
    location: Option<String>,
    abnormal_status: bool,
    current_data: CurrentData,
    schedule: Schedule,
}

impl DeviceRecordBuilder {
    #[must_use]
    pub fn id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn on_status(mut self, on_status: bool) -> Self {
        self.on_status = on_status;
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn abnormal_status(mut self, abnormal_status: bool) -> Self {
        self.abnormal_status = abnormal_status;
        self
    }

    #[must_use]
    pub fn current_data(mut self, current_data: CurrentData) -> Self {
        self.current_data = current_data;
        self
    }

    #[must_use]
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Consume the builder and return a [`DeviceRecord`].
    ///
    /// A missing id is freshly generated; missing strings default to empty.
    #[must_use]
    pub fn build(self) -> DeviceRecord {
        DeviceRecord {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            on_status: self.on_status,
            location: self.location.unwrap_or_default(),
            abnormal_status: self.abnormal_status,
            current_data: self.current_data,
            schedule: self.schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleEntry;
    use serde_json::json;

    fn stamp() -> Stamp {
        Stamp {
            time: "07:45".to_string(),
            date: "18/10/2026".to_string(),
        }
    }

    fn sensor() -> NewDeviceRecord {
        NewDeviceRecord {
            name: "Sensor1".to_string(),
            on_status: true,
            location: "Roof".to_string(),
            ..NewDeviceRecord::default()
        }
    }

    #[test]
    fn should_apply_defaults_when_optional_fields_omitted() {
        let record = sensor().into_record(RecordId::new(), stamp());

        assert!(!record.abnormal_status);
        assert!(record.description.is_none());
        assert_eq!(record.current_data.len(), 1);
        assert_eq!(record.schedule.len(), 1);

        let seed = &record.current_data.samples()[0];
        assert_eq!(seed.time, "07:45");
        assert_eq!(seed.date, "18/10/2026");
        assert!(seed.voltage.is_none());
        assert_eq!(record.schedule.entries()[0], ScheduleEntry::default());
    }

    #[test]
    fn should_keep_client_supplied_optionals() {
        let mut new = sensor();
        new.description = Some("rooftop panel".to_string());
        new.abnormal_status = Some(true);
        new.schedule = Some(Schedule::default());

        let record = new.into_record(RecordId::new(), stamp());
        assert_eq!(record.description.as_deref(), Some("rooftop panel"));
        assert!(record.abnormal_status);
        assert!(record.schedule.is_empty());
    }

    #[test]
    fn should_restore_flag_when_toggled_twice() {
        let mut record = sensor().into_record(RecordId::new(), stamp());

        assert!(!record.toggle(StatusFlag::On));
        assert!(record.toggle(StatusFlag::On));
        assert!(record.on_status);
        assert!(!record.abnormal_status);
    }

    #[test]
    fn should_serialize_with_camel_case_document_fields() {
        let record = DeviceRecord::builder()
            .id("dev1".to_string().into())
            .name("Plug")
            .location("Kitchen")
            .build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "dev1",
                "name": "Plug",
                "description": null,
                "onStatus": false,
                "location": "Kitchen",
                "abnormalStatus": false,
                "currentData": {"time": [], "date": [], "voltage": [], "current": [], "power": []},
                "schedule": {"day": [], "timeOn": [], "timeOff": []},
            })
        );
    }
}
