use racetime_core::summary::{consistency_score, generate_participant_summaries};
use racetime_core::{AttemptStatus, RaceAttempt};

fn attempt(bib: &str, duration: Option<f64>, status: AttemptStatus) -> RaceAttempt {
    RaceAttempt {
        bib_number: bib.to_string(),
        start_time: 0.0,
        finish_time: duration,
        duration,
        status,
        session_id: "session_1".to_string(),
    }
}

#[test]
fn single_completed_attempt_scores_full_consistency() {
    let summaries =
        generate_participant_summaries(&[attempt("7", Some(60.0), AttemptStatus::Completed)]);

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.best_time, Some(60.0));
    assert_eq!(summary.average_time, Some(60.0));
    assert_eq!(summary.consistency_score, 100.0);
    assert_eq!(summary.completed_races.len(), 1);
}

#[test]
fn score_uses_population_standard_deviation() {
    let score = consistency_score(&[50.0, 60.0, 70.0]);
    // std = sqrt(200 / 3) = 8.165, 13.61% of the mean
    assert!((score - 31.96).abs() < 0.01, "score was {score}");
}

#[test]
fn twenty_percent_spread_or_more_scores_zero() {
    assert_eq!(consistency_score(&[10.0, 30.0]), 0.0);
    assert!(consistency_score(&[80.0, 120.0]).abs() < 1e-9);
}

#[test]
fn identical_times_score_full_consistency() {
    assert_eq!(consistency_score(&[42.0, 42.0, 42.0]), 100.0);
    assert_eq!(consistency_score(&[]), 100.0);
}

#[test]
fn invalid_attempts_are_neither_completed_nor_dnf() {
    let attempts = vec![
        attempt("7", Some(55.0), AttemptStatus::Completed),
        attempt("7", None, AttemptStatus::Dnf),
        attempt("7", Some(0.2), AttemptStatus::InvalidTooFast),
        attempt("7", Some(900.0), AttemptStatus::InvalidTooSlow),
        attempt("7", Some(65.0), AttemptStatus::Completed),
    ];

    let summaries = generate_participant_summaries(&attempts);
    let summary = &summaries[0];

    assert_eq!(summary.dnf_count, 1);
    let completed: Vec<Option<f64>> = summary
        .completed_races
        .iter()
        .map(|race| race.duration)
        .collect();
    assert_eq!(completed, [Some(55.0), Some(65.0)]);
    assert_eq!(summary.best_time, Some(55.0));
    assert_eq!(summary.average_time, Some(60.0));
}

#[test]
fn summaries_sort_by_best_time_with_missing_last() {
    let attempts = vec![
        attempt("dnf-a", None, AttemptStatus::Dnf),
        attempt("slow", Some(90.0), AttemptStatus::Completed),
        attempt("dnf-b", None, AttemptStatus::Dnf),
        attempt("fast", Some(45.0), AttemptStatus::Completed),
        attempt("invalid", Some(0.1), AttemptStatus::InvalidTooFast),
    ];

    let summaries = generate_participant_summaries(&attempts);
    let order: Vec<&str> = summaries
        .iter()
        .map(|summary| summary.bib_number.as_str())
        .collect();

    assert_eq!(order, ["fast", "slow", "dnf-a", "dnf-b", "invalid"]);
    assert_eq!(summaries[4].dnf_count, 0);
    assert!(summaries[4].completed_races.is_empty());
    assert_eq!(summaries[4].consistency_score, 100.0);
}

#[test]
fn attempts_across_sessions_are_aggregated_per_bib() {
    let mut second = attempt("7", Some(70.0), AttemptStatus::Completed);
    second.session_id = "session_2".to_string();
    let attempts = vec![attempt("7", Some(60.0), AttemptStatus::Completed), second];

    let summaries = generate_participant_summaries(&attempts);

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].completed_races[1].session_id, "session_2");
    assert_eq!(summaries[0].average_time, Some(65.0));
}
