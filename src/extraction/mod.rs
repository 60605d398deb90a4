//! Timecard extraction via a hosted vision-language model
//!
//! - `client` sends the image plus a fixed prompt and returns raw text
//! - `response` strips code fences and parses the text into entries

pub mod client;
pub mod prompt;
pub mod response;

pub use client::{image_mime_type, ChatCompletionsExtractor, TimecardExtractor};
pub use response::{clean_response, parse_entries, ParseError};
