//! Data model for the extraction pipeline.
//!
//! All values flow strictly downstream: the directory parser produces
//! [`LineLink`]s, the detail parser produces a [`ParsedLine`] per page, and
//! the assembler flattens that into [`LineRecord`]s. Nothing is mutated
//! after being handed to the next stage.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Day-kind marker → lexicographically sorted time-of-day labels.
///
/// Times are kept in their raw string form; the site's labels sort
/// correctly as strings and the output contract preserves them verbatim.
pub type DaySchedules = BTreeMap<String, Vec<String>>;

/// One discovered bus line on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLink {
    /// Heading text of the grouping block the line was found under.
    pub line_type: String,
    /// Relative URL path of the line's detail page.
    pub link: String,
}

/// Timetables for a single starting point of a line.
///
/// Invariant: `schedules` has at least one day-kind entry; the parser only
/// creates an entry when it has a schedule to put in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartingPointTimetable {
    /// Departure-point label, e.g. "TICEN".
    pub starting_at: String,
    /// Trailing heading metadata, e.g. "Feriados". Last block wins when a
    /// starting point appears more than once.
    pub additional_info: Option<String>,
    pub schedules: DaySchedules,
}

/// A fully parsed line detail page.
///
/// `timetables` preserves the first-seen document order of starting points;
/// the assembler derives record ids from that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub number: String,
    pub name: String,
    pub timetables: Vec<StartingPointTimetable>,
}

impl ParsedLine {
    /// Look up a starting point's timetable by label.
    pub fn starting_point(&self, label: &str) -> Option<&StartingPointTimetable> {
        self.timetables.iter().find(|t| t.starting_at == label)
    }
}

/// The serialized output unit: one record per (line, starting point).
///
/// Field names match the downstream consumers of the original feed, so
/// they are part of the output contract and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// `"{number}.{index}"`, zero-based over the line's starting points.
    /// Stable only within a single run.
    pub id: String,
    pub number: String,
    pub name: String,
    pub starting_at: String,
    pub starting_at_additional_info: Option<String>,
    /// Normalized search tokens from `name`, `starting_at` and the
    /// additional info. Set semantics; ordering carries no meaning.
    pub searcheable_field: BTreeSet<String>,
    pub timetables: DaySchedules,
}
