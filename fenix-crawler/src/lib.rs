//! Bus-schedule extractor for the Consórcio Fênix website.
//!
//! A one-shot batch crawler: discovers the bus lines listed at
//! `/horarios`, fetches each line's detail page, parses the timetable
//! markup and emits one JSON record per (line, starting point), augmented
//! with normalized tokens for free-text search.

pub mod fetch;
pub mod model;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod record;
pub mod tokenize;
