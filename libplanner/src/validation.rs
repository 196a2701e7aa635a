//! Input validation rules
//!
//! Each function checks its rules in a fixed order and reports the first
//! one that fails.

use std::sync::OnceLock;

use regex::Regex;

use crate::calendar::DateRange;
use crate::error::ValidationError;
use crate::types::{DayPoint, Trip};

/// Minimum destination length when creating a trip
pub const MIN_DESTINATION_LENGTH: usize = 4;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Syntactic e-mail check (`local@domain.tld`, no whitespace)
pub fn is_valid_email(candidate: &str) -> bool {
    email_pattern().is_match(candidate)
}

/// Normalize typed e-mail input: surrounding whitespace dropped, lowercased
pub fn normalize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Destination filled in and both dates chosen.
///
/// Shared by trip creation and the trip update dialog.
pub fn check_trip_complete(destination: &str, range: &DateRange) -> Result<(), ValidationError> {
    if destination.trim().is_empty() || !range.is_complete() {
        return Err(ValidationError::IncompleteTripDetails);
    }
    Ok(())
}

/// Rules for leaving the trip details step of the creation wizard
pub fn validate_trip_details(destination: &str, range: &DateRange) -> Result<(), ValidationError> {
    check_trip_complete(destination, range)?;

    if destination.trim().chars().count() < MIN_DESTINATION_LENGTH {
        return Err(ValidationError::DestinationTooShort);
    }

    Ok(())
}

/// Rules for confirming attendance: name and e-mail are separate fields
pub fn validate_attendance(name: &str, email: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(ValidationError::IncompleteAttendance);
    }

    if !is_valid_email(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Rules for scheduling an activity on `day` at `hour` during `trip`
pub fn validate_activity(
    title: &str,
    day: Option<DayPoint>,
    hour: Option<u32>,
    trip: &Trip,
) -> Result<(), ValidationError> {
    let (Some(day), Some(hour)) = (day, hour) else {
        return Err(ValidationError::IncompleteActivity);
    };

    if title.trim().is_empty() {
        return Err(ValidationError::IncompleteActivity);
    }

    if hour > 23 {
        return Err(ValidationError::InvalidHour);
    }

    if !trip.covers(day) {
        return Err(ValidationError::ActivityOutsideTrip);
    }

    Ok(())
}

/// Rules for sharing a link: titled, and an absolute http(s) URL
pub fn validate_link(title: &str, url: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || url.trim().is_empty() {
        return Err(ValidationError::IncompleteLink);
    }

    match url::Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(s: &str) -> DayPoint {
        s.parse().unwrap()
    }

    fn full_range() -> DateRange {
        DateRange::between(day("2024-03-05"), day("2024-03-10"))
    }

    fn trip() -> Trip {
        Trip {
            id: "trip-1".to_string(),
            destination: "Lisbon".to_string(),
            starts_at: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
            is_confirmed: true,
        }
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@mail.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }

    #[test]
    fn test_trip_details_valid() {
        assert_eq!(validate_trip_details("Rio de Janeiro", &full_range()), Ok(()));
    }

    #[test]
    fn test_trip_details_missing_destination() {
        assert_eq!(
            validate_trip_details("   ", &full_range()),
            Err(ValidationError::IncompleteTripDetails)
        );
    }

    #[test]
    fn test_trip_details_missing_end() {
        let start_only = crate::calendar::select(DateRange::new(), day("2024-03-05"));
        assert_eq!(
            validate_trip_details("Rio de Janeiro", &start_only),
            Err(ValidationError::IncompleteTripDetails)
        );
    }

    #[test]
    fn test_trip_details_short_destination() {
        assert_eq!(
            validate_trip_details("Rio", &full_range()),
            Err(ValidationError::DestinationTooShort)
        );
    }

    #[test]
    fn test_incompleteness_wins_over_length() {
        assert_eq!(
            validate_trip_details("Rio", &DateRange::new()),
            Err(ValidationError::IncompleteTripDetails)
        );
    }

    #[test]
    fn test_trip_complete_allows_short_destination() {
        assert_eq!(check_trip_complete("Rio", &full_range()), Ok(()));
    }

    #[test]
    fn test_attendance_rules() {
        assert_eq!(validate_attendance("Ana", "ana@example.com"), Ok(()));
        assert_eq!(
            validate_attendance("", "ana@example.com"),
            Err(ValidationError::IncompleteAttendance)
        );
        assert_eq!(validate_attendance("Ana", " "), Err(ValidationError::IncompleteAttendance));
        assert_eq!(validate_attendance("Ana", "Ana"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_activity_rules() {
        let trip = trip();
        assert_eq!(
            validate_activity("Museum", Some(day("2024-03-06")), Some(14), &trip),
            Ok(())
        );
        assert_eq!(
            validate_activity("", Some(day("2024-03-06")), Some(14), &trip),
            Err(ValidationError::IncompleteActivity)
        );
        assert_eq!(
            validate_activity("Museum", None, Some(14), &trip),
            Err(ValidationError::IncompleteActivity)
        );
        assert_eq!(
            validate_activity("Museum", Some(day("2024-03-06")), Some(24), &trip),
            Err(ValidationError::InvalidHour)
        );
        assert_eq!(
            validate_activity("Museum", Some(day("2024-03-11")), Some(9), &trip),
            Err(ValidationError::ActivityOutsideTrip)
        );
    }

    #[test]
    fn test_link_rules() {
        assert_eq!(validate_link("Airbnb", "https://airbnb.com/rooms/1"), Ok(()));
        assert_eq!(validate_link("", "https://airbnb.com"), Err(ValidationError::IncompleteLink));
        assert_eq!(validate_link("Airbnb", "airbnb"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_link("Files", "ftp://files.example.com"), Err(ValidationError::InvalidUrl));
    }
}
