/// Formats seconds as `MM:SS.cc`, or `N/A` when there is no value.
pub fn format_race_time(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "N/A".to_string();
    };
    let minutes = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as i64;
    format!("{minutes:02}:{secs:02}.{hundredths:02}")
}
