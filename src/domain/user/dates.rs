//! Date formatting for user records
//!
//! All user-facing dates use the DD.MM.YYYY display form, e.g. "07.03.2020".
//! Birthdays arrive over the wire as ISO YYYY-MM-DD and are reformatted on
//! edit; anything that does not parse is rejected instead of being sliced
//! into a corrupted value.

use chrono::{NaiveDate, Utc};

use crate::domain::DomainError;

/// Display format for creation dates and birthdays
const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// ISO format accepted for birthday input
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Today's date in DD.MM.YYYY, used to stamp `creation_date` at registration
pub fn today_display() -> String {
    Utc::now().date_naive().format(DISPLAY_FORMAT).to_string()
}

/// Reformat an ISO `YYYY-MM-DD` birthday into the DD.MM.YYYY display form
pub fn reformat_birthday(input: &str) -> Result<String, DomainError> {
    let date = NaiveDate::parse_from_str(input, ISO_FORMAT)
        .map_err(|_| DomainError::invalid_date_format(input))?;

    Ok(date.format(DISPLAY_FORMAT).to_string())
}
