//! Group number generation.
//!
//! Group numbers follow the `TXN-YYYYMMDD-NNNN` format where the sequence
//! restarts at 0001 each day. Numbers are never reused, even after a draft
//! is deleted, so the sequence may have gaps.

use chrono::NaiveDate;

use super::error::LedgerError;

/// Prefix for all group numbers.
pub const GROUP_NUMBER_PREFIX: &str = "TXN";

const SEQUENCE_MAX: u32 = 9999;

/// Generates the next group number for the given date: finds the highest
/// sequence among existing numbers with the same date segment and adds one.
/// Starts at 0001 when no number exists for that date.
///
/// # Errors
///
/// Returns [`LedgerError::NumberRetriesExhausted`] if the day's sequence
/// space (9999 numbers) is exhausted.
pub fn next_group_number<'a>(
    date: NaiveDate,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<String, LedgerError> {
    let prefix = format!("{}-{}-", GROUP_NUMBER_PREFIX, date.format("%Y%m%d"));

    let max_sequence = existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    if max_sequence >= SEQUENCE_MAX {
        return Err(LedgerError::NumberRetriesExhausted { attempts: 0 });
    }

    Ok(format!("{}{:04}", prefix, max_sequence + 1))
}

/// Bumps a candidate number's sequence by one after a uniqueness collision.
///
/// # Errors
///
/// Returns [`LedgerError::NumberRetriesExhausted`] if the number is
/// malformed or the sequence space is exhausted.
pub fn bump_group_number(number: &str) -> Result<String, LedgerError> {
    let (prefix, sequence) = number
        .rsplit_once('-')
        .ok_or(LedgerError::NumberRetriesExhausted { attempts: 0 })?;

    let sequence: u32 = sequence
        .parse()
        .map_err(|_| LedgerError::NumberRetriesExhausted { attempts: 0 })?;

    if sequence >= SEQUENCE_MAX {
        return Err(LedgerError::NumberRetriesExhausted { attempts: 0 });
    }

    Ok(format!("{}-{:04}", prefix, sequence + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_number_of_day() {
        let number = next_group_number(date(2026, 1, 15), []).unwrap();
        assert_eq!(number, "TXN-20260115-0001");
    }

    #[test]
    fn test_increments_past_max() {
        let existing = ["TXN-20260115-0001", "TXN-20260115-0003"];
        let number = next_group_number(date(2026, 1, 15), existing).unwrap();
        assert_eq!(number, "TXN-20260115-0004");
    }

    #[test]
    fn test_sequence_restarts_per_day() {
        let existing = ["TXN-20260114-0007"];
        let number = next_group_number(date(2026, 1, 15), existing).unwrap();
        assert_eq!(number, "TXN-20260115-0001");
    }

    #[test]
    fn test_ignores_foreign_numbers() {
        let existing = ["TXN-20260115-0002", "INV-20260115-0009", "garbage"];
        let number = next_group_number(date(2026, 1, 15), existing).unwrap();
        assert_eq!(number, "TXN-20260115-0003");
    }

    #[test]
    fn test_exhausted_day() {
        let existing = ["TXN-20260115-9999"];
        let err = next_group_number(date(2026, 1, 15), existing).unwrap_err();
        assert!(matches!(err, LedgerError::NumberRetriesExhausted { .. }));
    }

    #[test]
    fn test_bump() {
        assert_eq!(
            bump_group_number("TXN-20260115-0001").unwrap(),
            "TXN-20260115-0002"
        );
    }

    #[test]
    fn test_bump_exhausted() {
        let err = bump_group_number("TXN-20260115-9999").unwrap_err();
        assert!(matches!(err, LedgerError::NumberRetriesExhausted { .. }));
    }
}
