mod common;
mod rfid_export;
pub(crate) mod schema;

pub use rfid_export::{
    export_header, parse_timing_log, parse_timing_log_with_report, RfidExportParser,
};
pub use schema::EXPORT_COLUMNS;

pub(crate) use common::{parse_flag, parse_optional_i64, parse_seconds, parse_utc_timestamp};
