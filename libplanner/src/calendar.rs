//! Date range selection for the trip calendar
//!
//! Turns a sequence of day taps into an ordered `(start, end)` range. The
//! selection is a pure function of the current range and the tapped day;
//! calendar markings are derived from the range on demand and never stored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DEFAULT_MARKING_COLOR;
use crate::types::DayPoint;

/// Presentation descriptor for one marked calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marking {
    pub is_start: bool,
    pub is_end: bool,
    pub is_between: bool,
    pub color: String,
}

/// Markings keyed by ISO date. Days outside the range have no entry.
pub type MarkingMap = BTreeMap<String, Marking>;

/// A possibly incomplete date range
///
/// Whenever both bounds are present, `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<DayPoint>,
    end: Option<DayPoint>,
}

impl DateRange {
    /// An empty range, nothing tapped yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete range, ordering the bounds chronologically
    pub fn between(a: DayPoint, b: DayPoint) -> Self {
        if b < a {
            Self { start: Some(b), end: Some(a) }
        } else {
            Self { start: Some(a), end: Some(b) }
        }
    }

    pub fn start(&self) -> Option<DayPoint> {
        self.start
    }

    pub fn end(&self) -> Option<DayPoint> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Both bounds chosen
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Both bounds, when the range is complete
    pub fn bounds(&self) -> Option<(DayPoint, DayPoint)> {
        self.start.zip(self.end)
    }

    /// Midnight UTC of the first day
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start.map(|day| day.start_of_day())
    }

    /// Midnight UTC of the last day
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end.map(|day| day.start_of_day())
    }

    /// Text for the "When?" field, e.g. `"5 to 10 of March"`.
    /// Empty until both bounds are chosen.
    pub fn summary(&self) -> String {
        match self.bounds() {
            Some((start, end)) => format!(
                "{} to {} of {}",
                start.day(),
                end.day(),
                end.naive().format("%B")
            ),
            None => String::new(),
        }
    }

    /// Markings with the default color
    pub fn markings(&self) -> MarkingMap {
        render_markings(self, DEFAULT_MARKING_COLOR)
    }
}

/// Apply a day tap to the current selection.
///
/// - No start yet: the tap becomes the start, dropping any stale end.
/// - Start only: a tap before the start swaps the bounds; any other tap
///   (the start itself included) becomes the end.
/// - Complete range: the tap starts a fresh selection.
pub fn select(current: DateRange, tapped: DayPoint) -> DateRange {
    match (current.start, current.end) {
        (Some(start), None) if tapped < start => DateRange {
            start: Some(tapped),
            end: Some(start),
        },
        (Some(start), None) => DateRange {
            start: Some(start),
            end: Some(tapped),
        },
        _ => DateRange {
            start: Some(tapped),
            end: None,
        },
    }
}

/// Mark every day from `start` to `end` inclusive.
///
/// A start-only range marks just the start day; an empty range marks nothing.
pub fn render_markings(range: &DateRange, color: &str) -> MarkingMap {
    let mut markings = MarkingMap::new();

    let Some(start) = range.start else {
        return markings;
    };

    let Some(end) = range.end else {
        markings.insert(
            start.date_string(),
            Marking {
                is_start: true,
                is_end: false,
                is_between: false,
                color: color.to_string(),
            },
        );
        return markings;
    };

    let mut day = Some(start);
    while let Some(current) = day.filter(|d| *d <= end) {
        let is_start = current == start;
        let is_end = current == end;
        markings.insert(
            current.date_string(),
            Marking {
                is_start,
                is_end,
                is_between: !is_start && !is_end,
                color: color.to_string(),
            },
        );
        day = current.succ();
    }

    markings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayPoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_tap_becomes_start() {
        let range = select(DateRange::new(), day("2024-03-10"));
        assert_eq!(range.start(), Some(day("2024-03-10")));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_later_tap_becomes_end() {
        let range = select(select(DateRange::new(), day("2024-03-05")), day("2024-03-10"));
        assert_eq!(range.bounds(), Some((day("2024-03-05"), day("2024-03-10"))));
    }

    #[test]
    fn test_earlier_tap_swaps_bounds() {
        let range = select(select(DateRange::new(), day("2024-03-10")), day("2024-03-05"));
        assert_eq!(range.start(), Some(day("2024-03-05")));
        assert_eq!(range.end(), Some(day("2024-03-10")));
    }

    #[test]
    fn test_same_day_tap_is_single_day_range() {
        let range = select(select(DateRange::new(), day("2024-03-05")), day("2024-03-05"));
        assert_eq!(range.bounds(), Some((day("2024-03-05"), day("2024-03-05"))));
    }

    #[test]
    fn test_third_tap_restarts_selection() {
        let complete = DateRange::between(day("2024-03-05"), day("2024-03-10"));
        let range = select(complete, day("2024-03-07"));
        assert_eq!(range.start(), Some(day("2024-03-07")));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_any_two_taps_are_ordered() {
        let days = [
            day("2023-12-31"),
            day("2024-01-01"),
            day("2024-02-29"),
            day("2024-03-05"),
            day("2025-07-14"),
        ];
        for a in days {
            for b in days {
                let range = select(select(DateRange::new(), a), b);
                let (start, end) = range.bounds().unwrap();
                assert!(start <= end, "{} then {} gave {}..{}", a, b, start, end);
            }
        }
    }

    #[test]
    fn test_select_is_deterministic() {
        let current = select(DateRange::new(), day("2024-03-10"));
        assert_eq!(select(current, day("2024-03-01")), select(current, day("2024-03-01")));
    }

    #[test]
    fn test_between_orders_bounds() {
        let range = DateRange::between(day("2024-03-10"), day("2024-03-05"));
        assert_eq!(range.start(), Some(day("2024-03-05")));
    }

    #[test]
    fn test_markings_empty_range() {
        assert!(DateRange::new().markings().is_empty());
    }

    #[test]
    fn test_markings_start_only() {
        let range = select(DateRange::new(), day("2024-03-05"));
        let markings = range.markings();

        assert_eq!(markings.len(), 1);
        let mark = &markings["2024-03-05"];
        assert!(mark.is_start);
        assert!(!mark.is_end);
        assert!(!mark.is_between);
    }

    #[test]
    fn test_markings_full_range() {
        let range = DateRange::between(day("2024-02-28"), day("2024-03-02"));
        let markings = render_markings(&range, "#a3e635");

        let keys: Vec<&str> = markings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]);

        assert!(markings["2024-02-28"].is_start);
        assert!(markings["2024-02-29"].is_between);
        assert!(markings["2024-03-01"].is_between);
        assert!(markings["2024-03-02"].is_end);
        assert!(markings.values().all(|m| m.color == "#a3e635"));
        assert!(!markings.contains_key("2024-03-03"));
    }

    #[test]
    fn test_markings_single_day_range() {
        let range = DateRange::between(day("2024-03-05"), day("2024-03-05"));
        let markings = range.markings();

        assert_eq!(markings.len(), 1);
        let mark = &markings["2024-03-05"];
        assert!(mark.is_start && mark.is_end && !mark.is_between);
    }

    #[test]
    fn test_summary() {
        assert_eq!(DateRange::new().summary(), "");
        assert_eq!(select(DateRange::new(), day("2024-03-05")).summary(), "");
        assert_eq!(
            DateRange::between(day("2024-03-05"), day("2024-03-10")).summary(),
            "5 to 10 of March"
        );
    }

    #[test]
    fn test_instants_are_start_of_day() {
        let range = DateRange::between(day("2024-03-05"), day("2024-03-10"));
        assert_eq!(range.starts_at().unwrap().to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(range.ends_at().unwrap().to_rfc3339(), "2024-03-10T00:00:00+00:00");
    }
}
