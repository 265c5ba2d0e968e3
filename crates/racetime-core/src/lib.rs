pub mod config;
pub mod dedup;
pub mod error;
pub mod format;
pub mod pairing;
pub mod pipeline;
pub mod sessions;
pub mod summary;
pub mod types;
pub mod validation;

pub use config::{AnalysisConfig, ConfigOverrides};
pub use error::ConfigError;
pub use pipeline::{analyze_race_data, analyze_race_data_with_report, analyze_records};
pub use racetime_parser::{ParseReport, RejectedRow, RowRejection};
pub use types::{
    AnalysisResult, AttemptStatus, ParticipantSummary, RaceAttempt, Session, StatusCounts,
    TimingPoint, TimingRecord,
};
