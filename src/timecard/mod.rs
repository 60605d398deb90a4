//! Worked-hours arithmetic for timecard entries
//!
//! Durations travel as "H:MM" strings end to end; an entry whose times
//! cannot be read carries the "Invalid time format" sentinel instead.

pub mod duration;
pub mod entry;

pub use duration::{add_durations, calculate_hours, INVALID_TIME_FORMAT};
pub use entry::{TimecardEntry, TimecardSummary};
