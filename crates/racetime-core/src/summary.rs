use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{AttemptStatus, ParticipantSummary, RaceAttempt};

/// Relative spread, in percent, that drives the consistency score down to zero.
const ZERO_SCORE_VARIATION_PERCENT: f64 = 20.0;

/// Builds one summary per bib across all sessions, fastest best time first.
pub fn generate_participant_summaries(attempts: &[RaceAttempt]) -> Vec<ParticipantSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&RaceAttempt>)> = Vec::new();
    for attempt in attempts {
        let slot = *index.entry(attempt.bib_number.as_str()).or_insert_with(|| {
            groups.push((attempt.bib_number.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(attempt);
    }

    let mut summaries: Vec<ParticipantSummary> = groups
        .into_iter()
        .map(|(bib_number, bib_attempts)| summarize_bib(bib_number, &bib_attempts))
        .collect();

    summaries.sort_by(|a, b| compare_best_time(a.best_time, b.best_time));
    summaries
}

fn summarize_bib(bib_number: &str, attempts: &[&RaceAttempt]) -> ParticipantSummary {
    let completed_races: Vec<RaceAttempt> = attempts
        .iter()
        .filter(|attempt| attempt.status == AttemptStatus::Completed)
        .map(|attempt| (*attempt).clone())
        .collect();
    let dnf_count = attempts
        .iter()
        .filter(|attempt| attempt.status == AttemptStatus::Dnf)
        .count();

    let durations: Vec<f64> = completed_races
        .iter()
        .filter_map(|attempt| attempt.duration)
        .collect();

    let best_time = durations.iter().copied().min_by(f64::total_cmp);
    let average_time = mean(&durations);

    ParticipantSummary {
        bib_number: bib_number.to_string(),
        completed_races,
        dnf_count,
        best_time,
        average_time,
        consistency_score: consistency_score(&durations),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Scores how evenly a participant finishes: the population standard deviation as a percentage
/// of the mean, where 0% scores 100 and 20% or more scores 0. Fewer than two durations score 100.
pub fn consistency_score(durations: &[f64]) -> f64 {
    if durations.len() < 2 {
        return 100.0;
    }
    let Some(average) = mean(durations) else {
        return 100.0;
    };

    let variance = durations
        .iter()
        .map(|duration| (duration - average).powi(2))
        .sum::<f64>()
        / durations.len() as f64;
    let variation_percent = variance.sqrt() / average * 100.0;
    let score = 100.0 - variation_percent * (100.0 / ZERO_SCORE_VARIATION_PERCENT);

    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Ascending, with missing best times last.
fn compare_best_time(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
