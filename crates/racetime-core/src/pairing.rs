use std::collections::HashMap;

use tracing::debug;

use crate::types::{RaceAttempt, Session, TimingRecord};

/// How START reads are matched to FINISH reads for one bib within one session.
///
/// Neither strategy applies a tolerance window: any finish strictly after the start is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingStrategy {
    /// Walk starts in time order with one forward-only cursor over the finishes.
    Sequential,
    /// Give each start the closest later finish still available.
    Proximity,
}

impl PairingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            PairingStrategy::Sequential => "sequential",
            PairingStrategy::Proximity => "proximity",
        }
    }

    pub fn pair(
        self,
        starts: &[&TimingRecord],
        finishes: &[&TimingRecord],
        session_id: &str,
    ) -> Vec<RaceAttempt> {
        match self {
            PairingStrategy::Sequential => sequential_pairing(starts, finishes, session_id),
            PairingStrategy::Proximity => proximity_pairing(starts, finishes, session_id),
        }
    }
}

/// The reads of one bib inside one session, split by timing point.
#[derive(Debug, Clone)]
pub struct BibReads<'a> {
    pub bib_number: &'a str,
    pub starts: Vec<&'a TimingRecord>,
    pub finishes: Vec<&'a TimingRecord>,
}

/// Groups records by bib in order of first appearance.
pub fn group_by_bib(records: &[TimingRecord]) -> Vec<BibReads<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<BibReads<'_>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.bib_number.as_str()).or_insert_with(|| {
            groups.push(BibReads {
                bib_number: record.bib_number.as_str(),
                starts: Vec::new(),
                finishes: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        if record.is_start() {
            group.starts.push(record);
        } else {
            group.finishes.push(record);
        }
    }

    groups
}

/// True when some bib ended up with more than one completed attempt.
pub fn has_ambiguous_pairs(attempts: &[RaceAttempt]) -> bool {
    let mut completed: HashMap<&str, usize> = HashMap::new();
    for attempt in attempts.iter().filter(|attempt| attempt.is_completed()) {
        let count = completed.entry(attempt.bib_number.as_str()).or_insert(0);
        *count += 1;
        if *count > 1 {
            return true;
        }
    }
    false
}

/// Pairs one bib's reads, falling back to proximity pairing when the sequential result is
/// ambiguous. Returns the strategy whose attempts were kept.
pub fn pair_bib(reads: &BibReads<'_>, session_id: &str) -> (PairingStrategy, Vec<RaceAttempt>) {
    let sequential = PairingStrategy::Sequential.pair(&reads.starts, &reads.finishes, session_id);
    if !has_ambiguous_pairs(&sequential) {
        return (PairingStrategy::Sequential, sequential);
    }

    debug!(
        session_id,
        bib = reads.bib_number,
        starts = reads.starts.len(),
        finishes = reads.finishes.len(),
        "Sequential pairing ambiguous, using proximity pairing"
    );
    let proximity = PairingStrategy::Proximity.pair(&reads.starts, &reads.finishes, session_id);
    (PairingStrategy::Proximity, proximity)
}

/// Pairs every bib of a session. Statuses are provisional until duration validation.
pub fn pair_starts_and_finishes(session: &Session) -> Vec<RaceAttempt> {
    group_by_bib(&session.records)
        .iter()
        .flat_map(|reads| pair_bib(reads, &session.id).1)
        .collect()
}

fn sorted_by_time<'a>(records: &[&'a TimingRecord]) -> Vec<&'a TimingRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
    sorted
}

fn sequential_pairing(
    starts: &[&TimingRecord],
    finishes: &[&TimingRecord],
    session_id: &str,
) -> Vec<RaceAttempt> {
    let starts = sorted_by_time(starts);
    let finishes = sorted_by_time(finishes);
    let mut consumed = vec![false; finishes.len()];
    let mut cursor = 0usize;
    let mut attempts = Vec::with_capacity(starts.len() + finishes.len());

    for start in starts {
        let mut matched = None;
        while cursor < finishes.len() {
            let candidate = cursor;
            cursor += 1;
            if finishes[candidate].time > start.time {
                matched = Some(candidate);
                break;
            }
        }

        match matched {
            Some(idx) => {
                consumed[idx] = true;
                attempts.push(RaceAttempt::paired(start, finishes[idx], session_id));
            }
            None => attempts.push(RaceAttempt::unfinished(start, session_id)),
        }
    }

    // Finishes skipped as too early and finishes after the last start both become orphans.
    attempts.extend(
        finishes
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(finish, _)| RaceAttempt::orphan(finish, session_id)),
    );

    attempts
}

fn proximity_pairing(
    starts: &[&TimingRecord],
    finishes: &[&TimingRecord],
    session_id: &str,
) -> Vec<RaceAttempt> {
    let starts = sorted_by_time(starts);
    let mut available = sorted_by_time(finishes);
    let mut attempts = Vec::with_capacity(starts.len() + available.len());

    for start in starts {
        let closest = available
            .iter()
            .enumerate()
            .filter(|(_, finish)| finish.time > start.time)
            .min_by(|(_, a), (_, b)| (a.time - start.time).total_cmp(&(b.time - start.time)))
            .map(|(idx, _)| idx);

        match closest {
            Some(idx) => {
                let finish = available.remove(idx);
                attempts.push(RaceAttempt::paired(start, finish, session_id));
            }
            None => attempts.push(RaceAttempt::unfinished(start, session_id)),
        }
    }

    attempts.extend(
        available
            .into_iter()
            .map(|finish| RaceAttempt::orphan(finish, session_id)),
    );

    attempts
}
