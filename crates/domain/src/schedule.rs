//! Schedule: the on/off plan log of a device record.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::telemetry::RaggedColumns;

/// One planned on/off window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day: Option<String>,
    pub time_on: Option<String>,
    pub time_off: Option<String>,
}

/// A schedule submission as received: every key may be absent.
///
/// The outer `Option` records whether the key was present at all, the inner
/// one whether its value was `null`. Only presence is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSubmission {
    #[serde(default, deserialize_with = "present")]
    pub day: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub time_on: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub time_off: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ScheduleSubmission {
    /// Turn the submission into an entry, listing every missing key otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingScheduleKeys`] when any of `day`,
    /// `timeOn` or `timeOff` is absent.
    pub fn complete(self) -> Result<ScheduleEntry, ValidationError> {
        match (self.day, self.time_on, self.time_off) {
            (Some(day), Some(time_on), Some(time_off)) => Ok(ScheduleEntry {
                day,
                time_on,
                time_off,
            }),
            (day, time_on, time_off) => {
                let missing = [
                    ("day", day.is_none()),
                    ("timeOn", time_on.is_none()),
                    ("timeOff", time_off.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                Err(ValidationError::MissingScheduleKeys(missing))
            }
        }
    }
}

/// Ordered schedule history of a device record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Columns", into = "Columns")]
pub struct Schedule(Vec<ScheduleEntry>);

impl Schedule {
    /// Schedule holding a single all-null entry.
    #[must_use]
    pub fn seeded() -> Self {
        Self(vec![ScheduleEntry::default()])
    }

    #[must_use]
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, entry: ScheduleEntry) {
        self.0.push(entry);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Columns {
    day: Vec<Option<String>>,
    time_on: Vec<Option<String>>,
    time_off: Vec<Option<String>>,
}

impl TryFrom<Columns> for Schedule {
    type Error = RaggedColumns;

    fn try_from(columns: Columns) -> Result<Self, Self::Error> {
        let lengths = vec![
            columns.day.len(),
            columns.time_on.len(),
            columns.time_off.len(),
        ];
        if lengths.iter().any(|len| *len != lengths[0]) {
            return Err(RaggedColumns { lengths });
        }

        let entries = columns
            .day
            .into_iter()
            .zip(columns.time_on)
            .zip(columns.time_off)
            .map(|((day, time_on), time_off)| ScheduleEntry {
                day,
                time_on,
                time_off,
            })
            .collect();
        Ok(Self(entries))
    }
}

impl From<Schedule> for Columns {
    fn from(schedule: Schedule) -> Self {
        let mut columns = Self::default();
        for entry in schedule.0 {
            columns.day.push(entry.day);
            columns.time_on.push(entry.time_on);
            columns.time_off.push(entry.time_off);
        }
        columns
    }
}
