pub mod config;
pub mod extraction;
pub mod http;
pub mod timecard;

pub use config::Config;
pub use extraction::{ChatCompletionsExtractor, TimecardExtractor};
pub use http::{create_router, AppState, RouterOptions};
pub use timecard::{add_durations, calculate_hours, TimecardEntry, TimecardSummary};
