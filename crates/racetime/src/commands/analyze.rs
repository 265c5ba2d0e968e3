use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use racetime_core::{analyze_race_data_with_report, AnalysisResult};
use tracing::{info, warn};

use crate::settings::ConfigArgs;
use crate::tables;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Comma-separated timing export, first line is the header
    pub file: PathBuf,
    #[command(flatten)]
    pub settings: ConfigArgs,
    #[arg(long, value_enum, default_value_t = View::Summary)]
    pub view: View,
    /// Only show this session, e.g. `session_2`
    #[arg(long)]
    pub session: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Per-participant ranking and status counts
    Summary,
    Sessions,
    Attempts,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Handler for `racetime analyze`.
pub fn handle_analyze_command(args: AnalyzeArgs) -> Result<()> {
    let config = args.settings.resolve()?;
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read timing export {}", args.file.display()))?;

    let (result, report) = analyze_race_data_with_report(&content, &config);
    for rejected in &report.rejected {
        warn!(line = rejected.line, reason = %rejected.reason, "Skipped timing export row");
    }
    info!(file = %args.file.display(), "Analyzed timing export");

    let result = match &args.session {
        Some(session_id) => scope_to_session(result, session_id)?,
        None => result,
    };

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .context("failed to serialize analysis result")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            println!("{}", tables::parse_summary(&report));
            match args.view {
                View::Summary => {
                    println!("{}", tables::status_table(&result.status_counts()));
                    println!("{}", tables::summary_table(&result.summaries));
                }
                View::Sessions => {
                    println!("{}", tables::sessions_table(&result));
                }
                View::Attempts => {
                    println!("{}", tables::attempts_table(&result.attempts));
                }
            }
        }
    }

    Ok(())
}

/// Keeps one session and its attempts; participant summaries stay cross-session.
fn scope_to_session(result: AnalysisResult, session_id: &str) -> Result<AnalysisResult> {
    if result.session(session_id).is_none() {
        let known: Vec<&str> = result.sessions.iter().map(|s| s.id.as_str()).collect();
        bail!(
            "no session '{}' in this export (sessions: {})",
            session_id,
            known.join(", ")
        );
    }

    let AnalysisResult {
        sessions,
        attempts,
        summaries,
    } = result;
    Ok(AnalysisResult {
        sessions: sessions
            .into_iter()
            .filter(|session| session.id == session_id)
            .collect(),
        attempts: attempts
            .into_iter()
            .filter(|attempt| attempt.session_id == session_id)
            .collect(),
        summaries,
    })
}
