//! Planner - trip planning client core
//!
//! This library provides the trip lifecycle behind the planner app: the
//! create-trip wizard, resuming the active trip on launch, and the trip
//! screen with its update, remove and attendance dialogs. Screens are
//! driven through pure reducers; controllers talk to the remote trip API
//! and to the device-local active trip store.

pub mod calendar;
pub mod config;
pub mod error;
mod in_flight;
pub mod logging;
pub mod navigation;
pub mod remote;
pub mod storage;
pub mod trip;
pub mod types;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use calendar::{DateRange, Marking, MarkingMap};
pub use config::Config;
pub use error::{PlannerError, Result, ValidationError};
pub use navigation::{ModalTarget, Prompt, Route};
pub use remote::TripClient;
pub use storage::{ActiveTripStore, FileTripStore, MemoryTripStore};
pub use trip::TripView;
pub use types::{DayPoint, Trip};
pub use wizard::TripWizard;
