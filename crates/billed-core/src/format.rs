use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::bill::BillStatus;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unparseable date: {0:?}")]
    Date(String),
}

// Three-letter French month abbreviations. Juin and juillet collapse to
// the same abbreviation in this short form.
const MONTH_ABBR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Render a stored ISO date in the short display form used by the
/// listing, e.g. `2004-04-04` becomes `4 Avr. 04`.
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FormatError::Date(raw.to_string()))?;
    let month = MONTH_ABBR[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year() % 100))
}

/// Map a stored status to its display label. Values outside the known
/// set pass through unchanged.
pub fn format_status(raw: &str) -> String {
    match BillStatus::from_str(raw) {
        Some(status) => status.label().to_string(),
        None => raw.to_string(),
    }
}
