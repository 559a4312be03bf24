//! Telemetry: the `currentData` log of a device record.
//!
//! Samples are held as one ordered sequence of structured records. On the
//! wire they are projected into five co-indexed sequences
//! (`time`, `date`, `voltage`, `current`, `power`), so the lockstep invariant
//! holds by construction and is re-checked whenever sequences are parsed back.

use serde::{Deserialize, Serialize};

use crate::time::Stamp;

/// A numeric reading, kept exactly as submitted so integers stay integers.
pub type Reading = serde_json::Number;

/// A partial measurement submitted by a device. Missing readings stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub voltage: Option<Reading>,
    #[serde(default)]
    pub current: Option<Reading>,
    #[serde(default)]
    pub power: Option<Reading>,
}

/// One stamped telemetry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub date: String,
    pub voltage: Option<Reading>,
    pub current: Option<Reading>,
    pub power: Option<Reading>,
}

impl Sample {
    /// Stamp a measurement, null-filling whatever the device did not report.
    #[must_use]
    pub fn stamped(stamp: Stamp, measurement: Measurement) -> Self {
        Self {
            time: stamp.time,
            date: stamp.date,
            voltage: measurement.voltage,
            current: measurement.current,
            power: measurement.power,
        }
    }

    /// Placeholder sample seeded into freshly created records.
    #[must_use]
    pub fn placeholder(stamp: Stamp) -> Self {
        Self::stamped(stamp, Measurement::default())
    }
}

/// Ordered telemetry history of a device record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Columns", into = "Columns")]
pub struct CurrentData(Vec<Sample>);

impl CurrentData {
    /// History holding a single placeholder sample.
    #[must_use]
    pub fn seeded(stamp: Stamp) -> Self {
        Self(vec![Sample::placeholder(stamp)])
    }

    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self(samples)
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
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

    pub fn push(&mut self, sample: Sample) {
        self.0.push(sample);
    }

    /// Drop the most recent sample, returning it.
    pub fn pop(&mut self) -> Option<Sample> {
        self.0.pop()
    }
}

/// Wire shape of [`CurrentData`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Columns {
    time: Vec<String>,
    date: Vec<String>,
    voltage: Vec<Option<Reading>>,
    current: Vec<Option<Reading>>,
    power: Vec<Option<Reading>>,
}

/// Parallel sequences whose lengths disagree.
#[derive(Debug, thiserror::Error)]
#[error("parallel sequences have unequal lengths: {lengths:?}")]
pub struct RaggedColumns {
    pub lengths: Vec<usize>,
}

impl TryFrom<Columns> for CurrentData {
    type Error = RaggedColumns;

    fn try_from(columns: Columns) -> Result<Self, Self::Error> {
        let lengths = vec![
            columns.time.len(),
            columns.date.len(),
            columns.voltage.len(),
            columns.current.len(),
            columns.power.len(),
        ];
        if lengths.iter().any(|len| *len != lengths[0]) {
            return Err(RaggedColumns { lengths });
        }

        let samples = columns
            .time
            .into_iter()
            .zip(columns.date)
            .zip(columns.voltage)
            .zip(columns.current)
            .zip(columns.power)
            .map(|((((time, date), voltage), current), power)| Sample {
                time,
                date,
                voltage,
                current,
                power,
            })
            .collect();
        Ok(Self(samples))
    }
}

impl From<CurrentData> for Columns {
    fn from(data: CurrentData) -> Self {
        let mut columns = Self::default();
        for sample in data.0 {
            columns.time.push(sample.time);
            columns.date.push(sample.date);
            columns.voltage.push(sample.voltage);
            columns.current.push(sample.current);
            columns.power.push(sample.power);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: f64) -> Option<Reading> {
        Reading::from_f64(value)
    }

    fn stamp() -> Stamp {
        Stamp {
            time: "10:30".to_string(),
            date: "18/10/2026".to_string(),
        }
    }

    #[test]
    fn should_null_fill_missing_readings_when_stamping() {
        let sample = Sample::stamped(
            stamp(),
            Measurement {
                voltage: reading(12.1),
                ..Measurement::default()
            },
        );
        assert_eq!(sample.voltage, reading(12.1));
        assert!(sample.current.is_none());
        assert!(sample.power.is_none());
        assert_eq!(sample.time, "10:30");
    }

    #[test]
    fn should_serialize_as_parallel_sequences() {
        let mut data = CurrentData::seeded(stamp());
        data.push(Sample::stamped(
            stamp(),
            Measurement {
                voltage: reading(12.1),
                current: reading(0.5),
                power: None,
            },
        ));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "time": ["10:30", "10:30"],
                "date": ["18/10/2026", "18/10/2026"],
                "voltage": [null, 12.1],
                "current": [null, 0.5],
                "power": [null, null],
            })
        );
    }

    #[test]
    fn should_parse_parallel_sequences_into_samples() {
        let data: CurrentData = serde_json::from_value(json!({
            "time": ["08:00"],
            "date": ["01/01/2026"],
            "voltage": [230.0],
            "current": [null],
            "power": [null],
        }))
        .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data.samples()[0].voltage, reading(230.0));
    }

    #[test]
    fn should_reject_sequences_of_unequal_length() {
        let result: Result<CurrentData, _> = serde_json::from_value(json!({
            "time": ["08:00", "09:00"],
            "date": ["01/01/2026"],
            "voltage": [null],
            "current": [null],
            "power": [null],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn should_treat_missing_sequences_as_empty() {
        let data: CurrentData = serde_json::from_value(json!({})).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn should_ignore_unknown_keys_in_measurement() {
        let measurement: Measurement =
            serde_json::from_value(json!({"power": 3.0, "time": "99:99"})).unwrap();
        assert_eq!(measurement.power, reading(3.0));
        assert!(measurement.voltage.is_none());
    }

    #[test]
    fn should_keep_integer_readings_as_integers() {
        let measurement: Measurement =
            serde_json::from_value(json!({"voltage": 0, "current": 230})).unwrap();
        let data = CurrentData::from_samples(vec![Sample::stamped(stamp(), measurement)]);

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["voltage"], json!([0]));
        assert_eq!(value["current"], json!([230]));
        assert_eq!(serde_json::to_string(&value["voltage"]).unwrap(), "[0]");
    }
}
