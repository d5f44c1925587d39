use chrono::NaiveDate;

use crate::models::BookingInfo;

#[derive(Debug, thiserror::Error)]
pub enum BookingDateError {
    #[error("empty date")]
    Empty,

    #[error("invalid calendar date {input:?}: {source}")]
    Invalid {
        input: String,
        source: chrono::ParseError,
    },
}

/// Parses the calendar date out of an ISO-8601 string such as
/// `2025-11-14T20:00:00.000Z`. Everything from the `T` on is discarded so a
/// UTC offset can never move the date to a neighbouring day.
pub fn parse_booking_date(raw: &str) -> Result<NaiveDate, BookingDateError> {
    let date_part = raw.trim().split('T').next().unwrap_or_default();
    if date_part.is_empty() {
        return Err(BookingDateError::Empty);
    }

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|source| BookingDateError::Invalid {
        input: date_part.to_string(),
        source,
    })
}

/// "Friday, November 14, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// Builds the booking line when both a date and a slot were picked. A date
/// that fails to parse is echoed back as-is.
pub fn format_booking(
    selected_date: Option<&str>,
    selected_time_slot: Option<&str>,
) -> Option<BookingInfo> {
    let raw_date = selected_date.filter(|d| !d.trim().is_empty())?;
    let time_slot = selected_time_slot.filter(|t| !t.trim().is_empty())?;

    let date = match parse_booking_date(raw_date) {
        Ok(date) => format_long_date(date),
        Err(e) => {
            tracing::warn!(error = %e, raw = %raw_date, "unparsable booking date, using raw value");
            raw_date.to_string()
        }
    };

    Some(BookingInfo {
        date,
        time_slot: time_slot.to_string(),
    })
}
