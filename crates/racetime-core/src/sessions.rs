use chrono::NaiveDate;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::types::{Session, TimingRecord};

/// Splits the record stream into sessions.
///
/// Records are ordered by time and folded into groups. A new group opens whenever the gap to the
/// previous record exceeds `session_gap_threshold`, the contest name changes, or the calendar
/// date (UTC) of the read changes. Every input record lands in exactly one session.
pub fn detect_sessions(records: &[TimingRecord], config: &AnalysisConfig) -> Vec<Session> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut stream = sorted.into_iter();
    let Some(first) = stream.next() else {
        return Vec::new();
    };

    let state = stream.fold(SegmentState::open(first), |state, record| {
        state.push(record, config)
    });
    let sessions = state.finish();

    for session in &sessions {
        debug!(
            session_id = %session.id,
            contest = %session.contest_name,
            records = session.record_count(),
            "Detected session"
        );
    }

    sessions
}

struct SegmentState {
    current: Vec<TimingRecord>,
    emitted: Vec<Session>,
}

impl SegmentState {
    fn open(first: TimingRecord) -> Self {
        Self {
            current: vec![first],
            emitted: Vec::new(),
        }
    }

    fn push(mut self, record: TimingRecord, config: &AnalysisConfig) -> Self {
        if self.breaks_before(&record, config) {
            self.close();
        }
        self.current.push(record);
        self
    }

    fn breaks_before(&self, record: &TimingRecord, config: &AnalysisConfig) -> bool {
        let (Some(opening), Some(previous)) = (self.current.first(), self.current.last()) else {
            return false;
        };
        let gap = record.time - previous.time;
        gap > config.session_gap_threshold
            || record.contest_name != opening.contest_name
            || calendar_date(record) != calendar_date(previous)
    }

    fn close(&mut self) {
        let records = std::mem::take(&mut self.current);
        let Some(opening) = records.first() else {
            return;
        };
        let contest_name = opening.contest_name.clone();
        let ordinal = self.emitted.len() + 1;
        self.emitted.push(Session::new(ordinal, contest_name, records));
    }

    fn finish(mut self) -> Vec<Session> {
        self.close();
        self.emitted
    }
}

/// Reads without a parseable UTC timestamp share a single "unknown" date.
fn calendar_date(record: &TimingRecord) -> Option<NaiveDate> {
    record.utc_time.map(|utc| utc.date_naive())
}
