pub mod errors;
pub mod formats;
pub mod model;

pub use errors::{RejectedRow, RowRejection};
pub use formats::{
    export_header, parse_timing_log, parse_timing_log_with_report, RfidExportParser,
    EXPORT_COLUMNS,
};
pub use model::{ParseReport, TimingPoint, TimingRecord};
