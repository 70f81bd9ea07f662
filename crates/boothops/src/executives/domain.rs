use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Performance score assumed for a worker whose record carries none.
pub const DEFAULT_PERFORMANCE_SCORE: f64 = 5.0;
/// Booking length assumed when the booking omits `duration_hours`.
pub const DEFAULT_DURATION_HOURS: f64 = 3.0;
/// Rating assumed for feedback or metrics that omit one.
pub const DEFAULT_RATING: f64 = 5.0;

/// Identifier as supplied by the caller: database rows use integers, imports use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Staff member eligible for a profit-share run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkerRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    /// Informational only; any JSON number is accepted.
    #[serde(default)]
    pub events_completed: Option<f64>,
}

impl WorkerRecord {
    pub fn new(id: i64, name: &str, performance_score: f64) -> Self {
        Self {
            id: Some(RecordId::Numeric(id)),
            name: Some(name.to_string()),
            performance_score: Some(performance_score),
            events_completed: None,
        }
    }

    /// Score used for weighting; missing scores use the baseline and negatives count as zero.
    pub fn weight(&self) -> f64 {
        self.performance_score
            .unwrap_or(DEFAULT_PERFORMANCE_SCORE)
            .max(0.0)
    }
}

/// Staff availability snapshot used for capacity and scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaffRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl StaffRecord {
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(false)
    }

    pub fn skills(&self) -> &[String] {
        self.skills.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Confirmed booking awaiting a staff assignment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
}

impl BookingRequest {
    pub fn duration_hours(&self) -> f64 {
        self.duration_hours.unwrap_or(DEFAULT_DURATION_HOURS)
    }
}

/// Customer review with optional complaint tags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub issues: Option<Vec<String>>,
}

impl FeedbackEntry {
    pub fn new(rating: f64, issues: &[&str]) -> Self {
        Self {
            rating: Some(rating),
            issues: Some(issues.iter().map(|issue| issue.to_string()).collect()),
        }
    }

    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RATING)
    }

    pub fn issues(&self) -> &[String] {
        self.issues.as_deref().unwrap_or(&[])
    }
}

/// Aggregate service figures maintained by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceMetrics {
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Hours between an inquiry and the first reply.
    #[serde(default)]
    pub average_response_time: Option<f64>,
}

impl ServiceMetrics {
    pub fn average_rating(&self) -> f64 {
        self.average_rating.unwrap_or(DEFAULT_RATING)
    }

    pub fn average_response_time(&self) -> f64 {
        self.average_response_time.unwrap_or(0.0)
    }
}

/// Round a monetary figure to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
