//! Timetable and locomotive-allocation data: loading, in-memory model,
//! and the train/locomotive resolution engine.

pub mod allocations;
pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use allocations::{AllocationStore, AllocationStoreRef, DayPlan};
pub use error::TimetableError;
pub use loader::load_timetables;
pub use resolve::{locomotives_for_train, train_on_day, trains_in_timespan};
pub use types::{HourMinute, ServiceInformation, TimetablePeriod, Train};

use std::sync::Arc;

/// Shared handle to the timetable periods, loaded once at startup.
pub type TimetableStore = Arc<Vec<TimetablePeriod>>;
