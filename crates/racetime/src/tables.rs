use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use racetime_core::format::format_race_time;
use racetime_core::{
    AnalysisResult, AttemptStatus, ParseReport, ParticipantSummary, RaceAttempt, StatusCounts,
};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn seconds(value: f64) -> String {
    format!("{value:.2}")
}

pub fn parse_summary(report: &ParseReport) -> String {
    format!(
        "Parsed {} of {} data lines ({} rejected)",
        report.accepted_count(),
        report.data_lines,
        report.rejected_count()
    )
}

pub fn status_table(counts: &StatusCounts) -> Table {
    let mut table = new_table(&["Status", "Attempts"]);
    for status in AttemptStatus::ALL {
        table.add_row(vec![status.to_string(), counts.get(status).to_string()]);
    }
    table.add_row(vec!["TOTAL".to_string(), counts.total().to_string()]);
    table
}

/// Participants in ranking order, fastest best time first.
pub fn summary_table(summaries: &[ParticipantSummary]) -> Table {
    let mut table = new_table(&[
        "Rank",
        "Bib",
        "Completed",
        "DNF",
        "Best",
        "Average",
        "Consistency",
    ]);
    for (idx, summary) in summaries.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            summary.bib_number.clone(),
            summary.completed_races.len().to_string(),
            summary.dnf_count.to_string(),
            format_race_time(summary.best_time),
            format_race_time(summary.average_time),
            format!("{:.1}", summary.consistency_score),
        ]);
    }
    table
}

pub fn sessions_table(result: &AnalysisResult) -> Table {
    let mut table = new_table(&["Session", "Name", "Contest", "Start", "End", "Reads", "Attempts"]);
    for session in &result.sessions {
        let attempt_count = result.attempts_for_session(&session.id).count();
        table.add_row(vec![
            session.id.clone(),
            session.name.clone(),
            session.contest_name.clone(),
            seconds(session.start_time),
            seconds(session.end_time),
            session.record_count().to_string(),
            attempt_count.to_string(),
        ]);
    }
    table
}

pub fn attempts_table<'a>(attempts: impl IntoIterator<Item = &'a RaceAttempt>) -> Table {
    let mut table = new_table(&["Session", "Bib", "Start", "Finish", "Duration", "Status"]);
    for attempt in attempts {
        table.add_row(vec![
            attempt.session_id.clone(),
            attempt.bib_number.clone(),
            seconds(attempt.start_time),
            attempt.finish_time.map(seconds).unwrap_or_else(|| "-".to_string()),
            format_race_time(attempt.duration),
            attempt.status.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use racetime_core::{analyze_race_data, AnalysisConfig};

    const EXPORT: &str = "RD_Invalid,RD_ID,RD_DeviceID,RD_Bib,RD_Transponder,RD_Time,Contest.Name,\
        RD_TimingPoint,RD_OrderID,RD_Hits,RD_RSSI,RD_UTCTime
0,1,D1,7,T7,10.0,Sprint,START,1,2,-60,2024-05-18T09:00:00Z
0,2,D2,7,T7,72.5,Sprint,FINISH,2,3,-55,2024-05-18T09:01:02Z
0,3,D1,9,T9,12.0,Sprint,START,3,2,-61,2024-05-18T09:00:02Z";

    #[test]
    fn summary_table_ranks_participants() {
        let result = analyze_race_data(EXPORT, &AnalysisConfig::default());
        let rendered = summary_table(&result.summaries).to_string();

        assert!(rendered.contains("01:02.50"));
        assert!(rendered.contains("N/A"));
        let bib7 = rendered.find(" 7 ").expect("bib 7 row");
        let bib9 = rendered.find(" 9 ").expect("bib 9 row");
        assert!(bib7 < bib9);
    }

    #[test]
    fn attempts_table_marks_unfinished_runs() {
        let result = analyze_race_data(EXPORT, &AnalysisConfig::default());
        let rendered = attempts_table(&result.attempts).to_string();

        assert!(rendered.contains("COMPLETED"));
        assert!(rendered.contains("DNF"));
        assert!(rendered.contains("72.50"));
    }

    #[test]
    fn sessions_table_counts_attempts_per_session() {
        let result = analyze_race_data(EXPORT, &AnalysisConfig::default());
        let rendered = sessions_table(&result).to_string();

        assert!(rendered.contains("session_1"));
        assert!(rendered.contains("Sprint"));
        let row = rendered
            .lines()
            .find(|line| line.contains("session_1"))
            .expect("session row");
        let cells: Vec<&str> = row
            .split('│')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        assert_eq!(cells.last(), Some(&"2"));
    }

    #[test]
    fn status_table_totals_every_attempt() {
        let result = analyze_race_data(EXPORT, &AnalysisConfig::default());
        let rendered = status_table(&result.status_counts()).to_string();

        assert!(rendered.contains("INVALID_TOO_SLOW"));
        assert!(rendered.contains("TOTAL"));
    }
}
