use csv::StringRecord;
use tracing::{debug, info};

use crate::errors::{RejectedRow, RowRejection};
use crate::model::{ParseReport, TimingPoint, TimingRecord};

use super::schema::{ExportColumn, EXPORT_COLUMNS};
use super::{parse_flag, parse_optional_i64, parse_seconds, parse_utc_timestamp};

/// Reader for the flat 12-column export written by RFID timing devices.
///
/// The first physical line is a header and is ignored. Fields are split on commas with no quoting
/// support. Rows that are short, flagged invalid by the device, timed with anything but a plain
/// number, or missing a usable bib/timing point are dropped and listed in the [`ParseReport`];
/// parsing never fails as a whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfidExportParser;

impl RfidExportParser {
    pub const NAME: &'static str = "RFID_EXPORT";

    fn reader_builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None);
        builder
    }

    pub fn parse(&self, content: &str) -> ParseReport {
        let mut reader = Self::reader_builder().from_reader(content.as_bytes());
        let mut report = ParseReport::default();

        // Input is already UTF-8 and the reader is flexible without quoting, so no record errors.
        for record in reader.records().flatten() {
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            if line == 1 || Self::is_blank(&record) {
                continue;
            }

            report.data_lines += 1;
            match Self::parse_row(&record) {
                Ok(parsed) => report.records.push(parsed),
                Err(reason) => Self::reject(&mut report, line, reason),
            }
        }

        info!(
            parser = Self::NAME,
            data_lines = report.data_lines,
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            "Parsed timing export"
        );

        report
    }

    fn reject(report: &mut ParseReport, line: u64, reason: RowRejection) {
        debug!(parser = Self::NAME, line, %reason, "Skipping timing row");
        report.rejected.push(RejectedRow::new(line, reason));
    }

    fn is_blank(record: &StringRecord) -> bool {
        record.iter().all(|field| field.trim().is_empty())
    }

    pub(crate) fn parse_row(record: &StringRecord) -> Result<TimingRecord, RowRejection> {
        if record.len() < EXPORT_COLUMNS.len() {
            return Err(RowRejection::TooFewColumns {
                expected: EXPORT_COLUMNS.len(),
                found: record.len(),
            });
        }

        let field = |column: ExportColumn| record.get(column.index()).unwrap_or("").trim();

        // Rows with a non-numeric time are dropped outright, suffixed values like `70.0s`
        // included: they cannot be placed on the timeline.
        let time = parse_seconds(field(ExportColumn::Time))?;

        let bib_number = field(ExportColumn::Bib);
        if bib_number.is_empty() {
            return Err(RowRejection::EmptyBib);
        }

        let raw_point = field(ExportColumn::TimingPoint);
        let timing_point = TimingPoint::try_from(raw_point)
            .map_err(|_| RowRejection::UnknownTimingPoint(raw_point.to_uppercase()))?;

        if parse_flag(field(ExportColumn::Invalid)) {
            return Err(RowRejection::FlaggedInvalid);
        }

        Ok(TimingRecord {
            invalid: false,
            id: field(ExportColumn::Id).to_string(),
            device_id: field(ExportColumn::DeviceId).to_string(),
            bib_number: bib_number.to_string(),
            transponder: field(ExportColumn::Transponder).to_string(),
            time,
            contest_name: field(ExportColumn::ContestName).to_string(),
            timing_point,
            order_id: field(ExportColumn::OrderId).to_string(),
            hits: parse_optional_i64(field(ExportColumn::Hits)),
            rssi: parse_optional_i64(field(ExportColumn::Rssi)),
            utc_time: parse_utc_timestamp(field(ExportColumn::UtcTime)),
        })
    }
}

/// Parses a timing export and returns the accepted records.
pub fn parse_timing_log(content: &str) -> Vec<TimingRecord> {
    RfidExportParser.parse(content).into_records()
}

/// Parses a timing export and keeps the reasons rows were dropped.
pub fn parse_timing_log_with_report(content: &str) -> ParseReport {
    RfidExportParser.parse(content)
}

/// Renders the header line of the export, handy for building fixtures.
pub fn export_header() -> String {
    EXPORT_COLUMNS.join(",")
}
