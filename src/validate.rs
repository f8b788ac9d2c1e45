use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Validate an entity title: must contain something other than whitespace.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("title must not be empty");
    }
    Ok(())
}

/// A project may not end before it starts. Open-ended ranges are fine.
pub fn validate_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            bail!(
                "end date {} is before start date {}",
                end.format("%Y-%m-%d"),
                start.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}

/// Parse a user-supplied date: either `YYYY-MM-DD` (midnight UTC) or a full
/// RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(t) => Ok(t.with_timezone(&Utc)),
        Err(_) => bail!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn valid_titles() {
        assert!(validate_title("Release plan").is_ok());
        assert!(validate_title("  padded  ").is_ok());
    }

    #[test]
    fn invalid_titles() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("\t\n").is_err());
    }

    #[test]
    fn date_ranges() {
        let jan = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(validate_date_range(Some(jan), Some(feb)).is_ok());
        assert!(validate_date_range(Some(jan), Some(jan)).is_ok());
        assert!(validate_date_range(None, Some(jan)).is_ok());
        assert!(validate_date_range(Some(feb), None).is_ok());
        assert!(validate_date_range(Some(feb), Some(jan)).is_err());
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("2025-03-04").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date("2025-03-04T10:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 4, 8, 0, 0).unwrap()
        );
        assert!(parse_date("next tuesday").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }
}
