use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RejectedRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimingPoint {
    Start,
    Finish,
}

impl TimingPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingPoint::Start => "START",
            TimingPoint::Finish => "FINISH",
        }
    }
}

impl fmt::Display for TimingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimingPoint {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "START" => Ok(TimingPoint::Start),
            "FINISH" => Ok(TimingPoint::Finish),
            other => Err(format!("unknown timing point '{other}'")),
        }
    }
}

/// One physical read from a timing device export.
///
/// Only `bib_number`, `timing_point`, `time`, `contest_name` and `utc_time` take part in the
/// analysis; the remaining device fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub invalid: bool,
    pub id: String,
    pub device_id: String,
    pub bib_number: String,
    pub transponder: String,
    /// Seconds on the device clock, shared by every record of one export.
    pub time: f64,
    pub contest_name: String,
    pub timing_point: TimingPoint,
    pub order_id: String,
    pub hits: Option<i64>,
    pub rssi: Option<i64>,
    pub utc_time: Option<DateTime<Utc>>,
}

impl TimingRecord {
    /// Builds a record with empty device metadata, mostly useful for tests and synthetic input.
    pub fn new(
        bib_number: impl Into<String>,
        timing_point: TimingPoint,
        time: f64,
        contest_name: impl Into<String>,
    ) -> Self {
        Self {
            invalid: false,
            id: String::new(),
            device_id: String::new(),
            bib_number: bib_number.into(),
            transponder: String::new(),
            time,
            contest_name: contest_name.into(),
            timing_point,
            order_id: String::new(),
            hits: None,
            rssi: None,
            utc_time: None,
        }
    }

    pub fn with_utc_time(mut self, utc_time: DateTime<Utc>) -> Self {
        self.utc_time = Some(utc_time);
        self
    }

    pub fn is_start(&self) -> bool {
        self.timing_point == TimingPoint::Start
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<TimingRecord>,
    /// Non-blank lines after the header, accepted or not.
    pub data_lines: usize,
    pub rejected: Vec<RejectedRow>,
}

impl ParseReport {
    pub fn accepted_count(&self) -> usize {
        self.records.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn into_records(self) -> Vec<TimingRecord> {
        self.records
    }
}
