//! Task and recurrence types.
//!
//! A task is bound to an anchor day and optionally repeats. These are the
//! records persisted by the store and evaluated by the recurrence engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{DaybookError, DaybookResult};

/// How a task repeats after its anchor day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Recurrence {
    /// Occurs once, on the anchor day.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 5] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Yearly,
    ];

    /// The tag used in persisted records and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    /// Strict tag lookup. Case-insensitive, ignores surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(tag))
    }

    /// Tag lookup that degrades unknown tags to `None`.
    pub fn from_tag_lossy(tag: &str) -> Self {
        match Self::from_tag(tag) {
            Some(r) => r,
            None => {
                tracing::warn!(tag, "unrecognized recurrence tag, treating task as one-off");
                Recurrence::None
            }
        }
    }

    pub fn is_recurring(&self) -> bool {
        *self != Recurrence::None
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            DaybookError::InvalidTask(format!(
                "unknown repeat '{}', expected none|daily|weekly|monthly|yearly",
                s
            ))
        })
    }
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Persisted tags are read fail-soft: null, non-string, structured and unknown
// values all come back as `Recurrence::None`.
impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecurrenceVisitor)
    }
}

struct RecurrenceVisitor;

impl<'de> Visitor<'de> for RecurrenceVisitor {
    type Value = Recurrence;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a recurrence tag")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Recurrence, E> {
        Ok(Recurrence::from_tag_lossy(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Recurrence, D::Error> {
        deserializer.deserialize_any(RecurrenceVisitor)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Recurrence, E> {
        Ok(Recurrence::None)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Recurrence, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        tracing::warn!("recurrence stored as a list, treating task as one-off");
        Ok(Recurrence::None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Recurrence, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        tracing::warn!("recurrence stored as an object, treating task as one-off");
        Ok(Recurrence::None)
    }
}

/// Stable identifier for a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task shown on its anchor day and, if it repeats, on every matching day after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Legacy records without an id get a fresh one on load.
    #[serde(default = "TaskId::new")]
    pub id: TaskId,
    pub title: String,
    /// Day the task was scheduled on. Time-of-day is dropped when reading.
    #[serde(deserialize_with = "deserialize_anchor")]
    pub anchor_date: NaiveDate,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task anchored on `anchor_date`. Rejects blank titles.
    pub fn new(
        title: impl Into<String>,
        anchor_date: NaiveDate,
        recurrence: Recurrence,
    ) -> DaybookResult<Self> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DaybookError::InvalidTask("title cannot be empty".into()));
        }

        Ok(Task {
            id: TaskId::new(),
            title: trimmed.to_string(),
            anchor_date,
            recurrence,
            created_at: Some(Utc::now()),
        })
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Parse a calendar day from `YYYY-MM-DD` or an ISO-8601 date-time.
///
/// Date-times are truncated to the day in their own offset, so
/// `2024-01-15T23:30:00-05:00` is Jan 15.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn deserialize_anchor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| de::Error::custom(format!("invalid anchor date '{}'", raw)))
}
