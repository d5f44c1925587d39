use std::fmt;

/// Requested consultation slot, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInfo {
    /// Long-form date, or the raw input when it could not be parsed.
    pub date: String,
    pub time_slot: String,
}

impl fmt::Display for BookingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📅 BOOKING REQUEST:\nDate: {}\nTime: {}",
            self.date, self.time_slot
        )
    }
}
