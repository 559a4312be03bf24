//! Opaque record identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a [`DeviceRecord`](crate::device_record::DeviceRecord).
///
/// Freshly generated ids are random UUIDs rendered without hyphens, but any
/// string is accepted as an id: an unknown id is simply absent from the
/// collection rather than malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl Default for RecordId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

impl RecordId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
