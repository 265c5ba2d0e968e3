use std::cmp::Ordering;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::types::TimingRecord;

/// Collapses repeated reads of the same bib at the same timing point.
///
/// Records are ordered by bib, timing point and time so that candidate duplicates sit next to
/// each other, then walked once. A record is dropped when it matches the bib and timing point of
/// the last record kept and lies less than `duplicate_threshold` seconds after it. Each record is
/// only compared against that single predecessor, so a long run of reads drifting by just under
/// the threshold keeps one record every time the drift since the last kept read reaches it.
pub fn remove_duplicates(records: &[TimingRecord], config: &AnalysisConfig) -> Vec<TimingRecord> {
    let mut sorted: Vec<&TimingRecord> = records.iter().collect();
    sorted.sort_by(|a, b| dedup_order(a, b));

    let mut kept: Vec<TimingRecord> = Vec::with_capacity(sorted.len());
    for record in sorted {
        let is_duplicate = kept.last().is_some_and(|previous| {
            previous.bib_number == record.bib_number
                && previous.timing_point == record.timing_point
                && (record.time - previous.time).abs() < config.duplicate_threshold
        });
        if !is_duplicate {
            kept.push(record.clone());
        }
    }

    debug!(
        input = records.len(),
        kept = kept.len(),
        threshold = config.duplicate_threshold,
        "Removed duplicate reads"
    );

    kept
}

fn dedup_order(a: &TimingRecord, b: &TimingRecord) -> Ordering {
    a.bib_number
        .cmp(&b.bib_number)
        .then_with(|| a.timing_point.as_str().cmp(b.timing_point.as_str()))
        .then_with(|| a.time.total_cmp(&b.time))
}
