use crate::config::AnalysisConfig;
use crate::types::{AttemptStatus, RaceAttempt};

pub fn classify_duration(duration: Option<f64>, config: &AnalysisConfig) -> AttemptStatus {
    match duration {
        None => AttemptStatus::Dnf,
        Some(value) if value < config.min_reasonable_race_time => AttemptStatus::InvalidTooFast,
        Some(value) if value > config.max_reasonable_race_time => AttemptStatus::InvalidTooSlow,
        Some(_) => AttemptStatus::Completed,
    }
}

/// Overwrites every attempt's status from its duration alone, including synthetic attempts built
/// from orphaned finishes.
pub fn validate_race_durations(
    attempts: Vec<RaceAttempt>,
    config: &AnalysisConfig,
) -> Vec<RaceAttempt> {
    attempts
        .into_iter()
        .map(|mut attempt| {
            attempt.status = classify_duration(attempt.duration, config);
            attempt
        })
        .collect()
}
