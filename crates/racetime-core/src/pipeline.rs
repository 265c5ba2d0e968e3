use racetime_parser::{parse_timing_log_with_report, ParseReport};
use tracing::{info, info_span};

use crate::config::AnalysisConfig;
use crate::dedup::remove_duplicates;
use crate::pairing::pair_starts_and_finishes;
use crate::sessions::detect_sessions;
use crate::summary::generate_participant_summaries;
use crate::types::{AnalysisResult, RaceAttempt, TimingRecord};
use crate::validation::validate_race_durations;

/// Runs the full analysis over the text of a timing export.
pub fn analyze_race_data(content: &str, config: &AnalysisConfig) -> AnalysisResult {
    analyze_race_data_with_report(content, config).0
}

/// Like [`analyze_race_data`], also returning what the parser accepted and rejected.
pub fn analyze_race_data_with_report(
    content: &str,
    config: &AnalysisConfig,
) -> (AnalysisResult, ParseReport) {
    let span = info_span!("analyze_race_data", bytes = content.len());
    let _guard = span.enter();

    let report = parse_timing_log_with_report(content);
    let result = analyze_records(&report.records, config);
    (result, report)
}

/// Runs deduplication, segmentation, pairing, validation and aggregation over parsed records.
pub fn analyze_records(records: &[TimingRecord], config: &AnalysisConfig) -> AnalysisResult {
    let unique = remove_duplicates(records, config);
    let sessions = detect_sessions(&unique, config);

    let paired: Vec<RaceAttempt> = sessions
        .iter()
        .flat_map(pair_starts_and_finishes)
        .collect();
    let attempts = validate_race_durations(paired, config);
    let summaries = generate_participant_summaries(&attempts);

    info!(
        records = records.len(),
        unique_records = unique.len(),
        sessions = sessions.len(),
        attempts = attempts.len(),
        participants = summaries.len(),
        "Race analysis complete"
    );

    AnalysisResult {
        sessions,
        attempts,
        summaries,
    }
}
