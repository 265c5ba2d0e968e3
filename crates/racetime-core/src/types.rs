use std::fmt;

use serde::{Deserialize, Serialize};

pub use racetime_parser::{TimingPoint, TimingRecord};

/// Assumed race length for a finish read that has no start to pair with.
pub const ORPHAN_ESTIMATED_DURATION: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    Completed,
    Dnf,
    InvalidTooFast,
    InvalidTooSlow,
}

impl AttemptStatus {
    pub const ALL: [AttemptStatus; 4] = [
        AttemptStatus::Completed,
        AttemptStatus::Dnf,
        AttemptStatus::InvalidTooFast,
        AttemptStatus::InvalidTooSlow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Completed => "COMPLETED",
            AttemptStatus::Dnf => "DNF",
            AttemptStatus::InvalidTooFast => "INVALID_TOO_FAST",
            AttemptStatus::InvalidTooSlow => "INVALID_TOO_SLOW",
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous window of reads treated as one race or contest heat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub contest_name: String,
    pub records: Vec<TimingRecord>,
}

impl Session {
    /// `ordinal` is 1-based.
    pub fn new(ordinal: usize, contest_name: String, records: Vec<TimingRecord>) -> Self {
        let start_time = records.first().map(|record| record.time).unwrap_or_default();
        let end_time = records.last().map(|record| record.time).unwrap_or_default();
        Self {
            id: format!("session_{ordinal}"),
            name: format!("Session {ordinal}"),
            start_time,
            end_time,
            contest_name,
            records,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceAttempt {
    pub bib_number: String,
    pub start_time: f64,
    pub finish_time: Option<f64>,
    pub duration: Option<f64>,
    pub status: AttemptStatus,
    pub session_id: String,
}

impl RaceAttempt {
    pub fn paired(start: &TimingRecord, finish: &TimingRecord, session_id: &str) -> Self {
        Self {
            bib_number: start.bib_number.clone(),
            start_time: start.time,
            finish_time: Some(finish.time),
            duration: Some(finish.time - start.time),
            status: AttemptStatus::Completed,
            session_id: session_id.to_string(),
        }
    }

    pub fn unfinished(start: &TimingRecord, session_id: &str) -> Self {
        Self {
            bib_number: start.bib_number.clone(),
            start_time: start.time,
            finish_time: None,
            duration: None,
            status: AttemptStatus::Dnf,
            session_id: session_id.to_string(),
        }
    }

    /// A finish with no usable start is taken to follow a missed start read.
    pub fn orphan(finish: &TimingRecord, session_id: &str) -> Self {
        Self {
            bib_number: finish.bib_number.clone(),
            start_time: finish.time - ORPHAN_ESTIMATED_DURATION,
            finish_time: Some(finish.time),
            duration: Some(ORPHAN_ESTIMATED_DURATION),
            status: AttemptStatus::InvalidTooFast,
            session_id: session_id.to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AttemptStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub bib_number: String,
    pub completed_races: Vec<RaceAttempt>,
    pub dnf_count: usize,
    pub best_time: Option<f64>,
    pub average_time: Option<f64>,
    /// 0 to 100; 100 means no spread between completed durations.
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub dnf: usize,
    pub invalid_too_fast: usize,
    pub invalid_too_slow: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttemptStatus) {
        match status {
            AttemptStatus::Completed => self.completed += 1,
            AttemptStatus::Dnf => self.dnf += 1,
            AttemptStatus::InvalidTooFast => self.invalid_too_fast += 1,
            AttemptStatus::InvalidTooSlow => self.invalid_too_slow += 1,
        }
    }

    pub fn get(&self, status: AttemptStatus) -> usize {
        match status {
            AttemptStatus::Completed => self.completed,
            AttemptStatus::Dnf => self.dnf,
            AttemptStatus::InvalidTooFast => self.invalid_too_fast,
            AttemptStatus::InvalidTooSlow => self.invalid_too_slow,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.dnf + self.invalid_too_fast + self.invalid_too_slow
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sessions: Vec<Session>,
    pub attempts: Vec<RaceAttempt>,
    pub summaries: Vec<ParticipantSummary>,
}

impl AnalysisResult {
    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == session_id)
    }

    pub fn attempts_for_session<'a>(
        &'a self,
        session_id: &'a str,
    ) -> impl Iterator<Item = &'a RaceAttempt> + 'a {
        self.attempts
            .iter()
            .filter(move |attempt| attempt.session_id == session_id)
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for attempt in &self.attempts {
            counts.record(attempt.status);
        }
        counts
    }
}
