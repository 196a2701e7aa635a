//! Core types for Planner

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Destinations longer than this are shortened in the trip headline
const HEADLINE_DESTINATION_MAX: usize = 14;

/// A calendar day, as tapped on the date picker
///
/// Serializes as its ISO string (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayPoint {
    date: NaiveDate,
}

impl DayPoint {
    /// Build a day from its parts, or `None` for an impossible date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// The ISO representation used as marking map key (`2024-03-05`)
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.date
    }

    /// Midnight UTC of this day
    pub fn start_of_day(&self) -> DateTime<Utc> {
        self.date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// The following calendar day, `None` past the end of the calendar
    pub fn succ(&self) -> Option<Self> {
        self.date.succ_opt().map(Self::from)
    }
}

impl From<NaiveDate> for DayPoint {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl FromStr for DayPoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from)
            .map_err(|_| ValidationError::InvalidDate)
    }
}

impl fmt::Display for DayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date_string())
    }
}

/// A trip as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl Trip {
    /// One-line summary shown at the top of the trip screen,
    /// e.g. `"Florianópolis from 10 to 15 Mar."`
    pub fn headline(&self) -> String {
        let destination = if self.destination.chars().count() > HEADLINE_DESTINATION_MAX {
            let shortened: String = self
                .destination
                .chars()
                .take(HEADLINE_DESTINATION_MAX)
                .collect();
            format!("{}...", shortened)
        } else {
            self.destination.clone()
        };

        format!(
            "{} from {} to {} {}.",
            destination,
            self.starts_at.format("%d"),
            self.ends_at.format("%d"),
            self.starts_at.format("%b"),
        )
    }

    pub fn first_day(&self) -> DayPoint {
        DayPoint::from(self.starts_at.date_naive())
    }

    pub fn last_day(&self) -> DayPoint {
        DayPoint::from(self.ends_at.date_naive())
    }

    /// Whether `day` falls within the trip dates, bounds included
    pub fn covers(&self, day: DayPoint) -> bool {
        self.first_day() <= day && day <= self.last_day()
    }
}

/// Payload for creating a trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTrip {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub emails_to_invite: Vec<String>,
}

/// Payload for updating an existing trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripUpdate {
    #[serde(skip)]
    pub id: String,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// A scheduled activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub occurs_at: DateTime<Utc>,
}

impl Activity {
    /// Time of day as shown on the activity card (`"14:00h"`)
    pub fn hour(&self) -> String {
        format!("{}h", self.occurs_at.format("%H:%M"))
    }

    /// Whether the activity already happened at `now`
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.occurs_at < now
    }
}

/// Activities of a single trip day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: DateTime<Utc>,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub title: String,
    pub occurs_at: DateTime<Utc>,
}

/// A link shared with the trip participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLink {
    pub title: String,
    pub url: String,
}

/// A guest invited to the trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl Participant {
    /// Name to display; guests who have not confirmed yet have none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Pending")
    }
}

/// Guest details sent when confirming attendance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceConfirmation {
    pub name: String,
    pub email: String,
}
