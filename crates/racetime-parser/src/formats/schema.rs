/// Column headers of the timing device export, in file order.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "RD_Invalid",
    "RD_ID",
    "RD_DeviceID",
    "RD_Bib",
    "RD_Transponder",
    "RD_Time",
    "Contest.Name",
    "RD_TimingPoint",
    "RD_OrderID",
    "RD_Hits",
    "RD_RSSI",
    "RD_UTCTime",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportColumn {
    Invalid,
    Id,
    DeviceId,
    Bib,
    Transponder,
    Time,
    ContestName,
    TimingPoint,
    OrderId,
    Hits,
    Rssi,
    UtcTime,
}

impl ExportColumn {
    pub fn index(self) -> usize {
        self as usize
    }
}
