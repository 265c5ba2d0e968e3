use racetime_core::pairing::{
    group_by_bib, has_ambiguous_pairs, pair_bib, pair_starts_and_finishes, PairingStrategy,
};
use racetime_core::{AttemptStatus, RaceAttempt, Session, TimingPoint, TimingRecord};

fn start(bib: &str, time: f64) -> TimingRecord {
    TimingRecord::new(bib, TimingPoint::Start, time, "Sprint")
}

fn finish(bib: &str, time: f64) -> TimingRecord {
    TimingRecord::new(bib, TimingPoint::Finish, time, "Sprint")
}

fn summary(attempts: &[RaceAttempt]) -> Vec<(f64, Option<f64>, Option<f64>, AttemptStatus)> {
    attempts
        .iter()
        .map(|a| (a.start_time, a.finish_time, a.duration, a.status))
        .collect()
}

#[test]
fn second_start_without_finish_is_dnf() {
    let starts = [start("7", 100.0), start("7", 0.0)];
    let finishes = [finish("7", 50.0)];
    let start_refs: Vec<&TimingRecord> = starts.iter().collect();
    let finish_refs: Vec<&TimingRecord> = finishes.iter().collect();

    let attempts = PairingStrategy::Sequential.pair(&start_refs, &finish_refs, "session_1");

    assert_eq!(
        summary(&attempts),
        [
            (0.0, Some(50.0), Some(50.0), AttemptStatus::Completed),
            (100.0, None, None, AttemptStatus::Dnf),
        ]
    );
    assert!(attempts.iter().all(|a| a.session_id == "session_1"));
}

#[test]
fn finish_without_any_start_becomes_orphan_attempt() {
    let finishes = [finish("15", 500.0)];
    let finish_refs: Vec<&TimingRecord> = finishes.iter().collect();

    let attempts = PairingStrategy::Sequential.pair(&[], &finish_refs, "session_1");

    assert_eq!(
        summary(&attempts),
        [(440.0, Some(500.0), Some(60.0), AttemptStatus::InvalidTooFast)]
    );
    assert_eq!(attempts[0].bib_number, "15");
}

#[test]
fn finish_skipped_by_cursor_becomes_orphan_attempt() {
    let starts = [start("7", 10.0)];
    let finishes = [finish("7", 5.0), finish("7", 40.0)];
    let start_refs: Vec<&TimingRecord> = starts.iter().collect();
    let finish_refs: Vec<&TimingRecord> = finishes.iter().collect();

    let attempts = PairingStrategy::Sequential.pair(&start_refs, &finish_refs, "session_1");

    assert_eq!(
        summary(&attempts),
        [
            (10.0, Some(40.0), Some(30.0), AttemptStatus::Completed),
            (-55.0, Some(5.0), Some(60.0), AttemptStatus::InvalidTooFast),
        ]
    );
}

#[test]
fn finish_at_same_instant_as_start_is_not_eligible() {
    let starts = [start("7", 10.0)];
    let finishes = [finish("7", 10.0)];
    let start_refs: Vec<&TimingRecord> = starts.iter().collect();
    let finish_refs: Vec<&TimingRecord> = finishes.iter().collect();

    for strategy in [PairingStrategy::Sequential, PairingStrategy::Proximity] {
        let attempts = strategy.pair(&start_refs, &finish_refs, "session_1");
        assert_eq!(attempts[0].status, AttemptStatus::Dnf, "{}", strategy.name());
        assert_eq!(attempts[1].status, AttemptStatus::InvalidTooFast);
    }
}

#[test]
fn proximity_takes_closest_later_finish() {
    let starts = [start("7", 0.0), start("7", 45.0)];
    let finishes = [finish("7", 90.0), finish("7", 40.0), finish("7", 60.0)];
    let start_refs: Vec<&TimingRecord> = starts.iter().collect();
    let finish_refs: Vec<&TimingRecord> = finishes.iter().collect();

    let attempts = PairingStrategy::Proximity.pair(&start_refs, &finish_refs, "session_2");

    assert_eq!(
        summary(&attempts),
        [
            (0.0, Some(40.0), Some(40.0), AttemptStatus::Completed),
            (45.0, Some(60.0), Some(15.0), AttemptStatus::Completed),
            (30.0, Some(90.0), Some(60.0), AttemptStatus::InvalidTooFast),
        ]
    );
}

#[test]
fn ambiguity_requires_repeat_completions_for_one_bib() {
    let a_start = start("7", 0.0);
    let a_finish = finish("7", 30.0);
    let b_start = start("7", 40.0);
    let b_finish = finish("7", 80.0);
    let other_start = start("8", 0.0);
    let other_finish = finish("8", 30.0);

    let repeat = vec![
        RaceAttempt::paired(&a_start, &a_finish, "session_1"),
        RaceAttempt::paired(&b_start, &b_finish, "session_1"),
    ];
    assert!(has_ambiguous_pairs(&repeat));

    let distinct = vec![
        RaceAttempt::paired(&a_start, &a_finish, "session_1"),
        RaceAttempt::paired(&other_start, &other_finish, "session_1"),
    ];
    assert!(!has_ambiguous_pairs(&distinct));

    let with_dnf = vec![
        RaceAttempt::paired(&a_start, &a_finish, "session_1"),
        RaceAttempt::unfinished(&b_start, "session_1"),
        RaceAttempt::orphan(&b_finish, "session_1"),
    ];
    assert!(!has_ambiguous_pairs(&with_dnf));
}

#[test]
fn repeated_laps_fall_back_to_proximity() {
    let records = vec![
        start("7", 0.0),
        finish("7", 150.0),
        start("7", 100.0),
        finish("7", 160.0),
    ];
    let groups = group_by_bib(&records);

    let (strategy, attempts) = pair_bib(&groups[0], "session_1");

    assert_eq!(strategy, PairingStrategy::Proximity);
    assert_eq!(
        summary(&attempts),
        [
            (0.0, Some(150.0), Some(150.0), AttemptStatus::Completed),
            (100.0, Some(160.0), Some(60.0), AttemptStatus::Completed),
        ]
    );
}

#[test]
fn single_lap_keeps_sequential_result() {
    let records = vec![start("7", 10.0), finish("7", 70.0)];
    let groups = group_by_bib(&records);

    let (strategy, attempts) = pair_bib(&groups[0], "session_1");

    assert_eq!(strategy, PairingStrategy::Sequential);
    assert_eq!(
        summary(&attempts),
        [(10.0, Some(70.0), Some(60.0), AttemptStatus::Completed)]
    );
}

#[test]
fn bibs_are_grouped_in_order_of_first_read() {
    let records = vec![
        start("12", 0.0),
        start("3", 1.0),
        finish("12", 40.0),
        finish("3", 45.0),
        start("40", 50.0),
    ];

    let groups = group_by_bib(&records);
    let bibs: Vec<&str> = groups.iter().map(|group| group.bib_number).collect();

    assert_eq!(bibs, ["12", "3", "40"]);
    assert_eq!(groups[0].starts.len(), 1);
    assert_eq!(groups[0].finishes.len(), 1);
    assert!(groups[2].finishes.is_empty());
}

#[test]
fn session_pairing_tags_attempts_with_session_id() {
    let session = Session::new(
        4,
        "Sprint".to_string(),
        vec![
            start("12", 0.0),
            start("3", 1.0),
            finish("12", 40.0),
            finish("3", 45.0),
        ],
    );

    let attempts = pair_starts_and_finishes(&session);

    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].bib_number, "12");
    assert_eq!(attempts[1].bib_number, "3");
    assert!(attempts.iter().all(|a| a.session_id == "session_4"));
}
