//! Parser for a single line's detail page.
//!
//! A detail page carries one `h1` heading naming the line ("{name} -
//! {number}") and a run of timetable blocks inside the `#conteudo` content
//! region. The first block holds page-level notes only; each following
//! block is one (starting point, day kind) schedule. The markup is
//! irregular, so every extraction point is checked and reported as a
//! [`StructureError`] instead of being indexed blindly.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::model::{ParsedLine, StartingPointTimetable};

use super::error::StructureError;

// Selector literals are static and known-valid; parsing them cannot fail.
static PRIMARY_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#conteudo h1 a").expect("static selector"));
static CONTENT_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#conteudo > div > div").expect("static selector"));
static DAY_KIND_MARKER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-semana]").expect("static selector"));
static BLOCK_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("static selector"));
static SCHEDULE_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Length in characters of the "Saída:" label that prefixes the starting
/// point in every timetable-block heading.
const DEPARTURE_LABEL_LEN: usize = 6;

/// Parse a line detail page into its number, name and timetables.
///
/// Preconditions checked against the live markup:
/// - the first `#conteudo h1 a` is the line heading and contains a `-`;
/// - the first `#conteudo > div > div` is the content container whose
///   child `div`s are the timetable blocks (first block discarded);
/// - each block has an `h4` heading with at least two `-` segments and a
///   descendant `div` carrying the `data-semana` day-kind attribute.
pub fn parse_detail(html: &str) -> Result<ParsedLine, StructureError> {
    let document = Html::parse_document(html);

    let heading: String = document
        .select(&PRIMARY_HEADING)
        .next()
        .ok_or(StructureError::MissingElement("primary heading link (#conteudo h1 a)"))?
        .text()
        .collect();
    let (name, number) = split_name_and_number(&heading)?;

    let container = document
        .select(&CONTENT_CONTAINER)
        .next()
        .ok_or(StructureError::MissingElement("timetable container (#conteudo > div > div)"))?;

    let mut timetables: Vec<StartingPointTimetable> = Vec::new();

    // The first child div holds supplementary page-level info, not a
    // timetable, hence the skip(1).
    for block in child_divs(container).skip(1) {
        let (starting_at, additional_info) = parse_block_heading(block)?;
        let day_kind = parse_day_kind(block)?;
        let schedule = collect_schedule(block);

        match timetables.iter_mut().find(|t| t.starting_at == starting_at) {
            Some(entry) => {
                entry.schedules.insert(day_kind, schedule);
                // Last block for this starting point wins, even when it
                // carries no info at all.
                entry.additional_info = additional_info;
            }
            None => timetables.push(StartingPointTimetable {
                starting_at,
                additional_info,
                schedules: BTreeMap::from([(day_kind, schedule)]),
            }),
        }
    }

    Ok(ParsedLine {
        number,
        name,
        timetables,
    })
}

/// Split the page heading on `-`: the last segment is the line number, the
/// preceding segments rejoined are the name.
fn split_name_and_number(heading: &str) -> Result<(String, String), StructureError> {
    let segments: Vec<&str> = heading.split('-').collect();
    if segments.len() < 2 {
        return Err(StructureError::MalformedHeading {
            heading: heading.to_string(),
            expected: 2,
        });
    }

    let number = segments[segments.len() - 1].trim().to_string();
    let name = segments[..segments.len() - 1].join("-").trim().to_string();
    Ok((name, number))
}

/// Extract (starting point, optional additional info) from a timetable
/// block's heading, e.g. "Horário - Saída: TICEN - Feriados".
fn parse_block_heading(block: ElementRef<'_>) -> Result<(String, Option<String>), StructureError> {
    let heading: String = block
        .select(&BLOCK_HEADING)
        .next()
        .ok_or(StructureError::MissingElement("h4 heading in timetable block"))?
        .text()
        .collect();

    let segments: Vec<&str> = heading.split('-').collect();
    if segments.len() < 2 {
        return Err(StructureError::MalformedHeading {
            heading,
            expected: 2,
        });
    }

    let starting_at = strip_departure_label(segments[1]);
    let additional_info = segments.get(2).map(|s| s.trim().to_string());
    Ok((starting_at, additional_info))
}

/// Drop the fixed "Saída:" label from a heading segment, leaving the bare
/// starting-point name.
fn strip_departure_label(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .skip(DEPARTURE_LABEL_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_day_kind(block: ElementRef<'_>) -> Result<String, StructureError> {
    let marker = block
        .select(&DAY_KIND_MARKER)
        .next()
        .ok_or(StructureError::MissingElement("day-kind marker (div[data-semana])"))?;
    let day_kind = marker
        .value()
        .attr("data-semana")
        .ok_or(StructureError::MissingAttribute {
            element: "div",
            attribute: "data-semana",
        })?;
    Ok(day_kind.to_string())
}

/// Collect the first text node of every anchor in the block as the raw
/// schedule, sorted in string order (the labels sort correctly as text).
fn collect_schedule(block: ElementRef<'_>) -> Vec<String> {
    let mut schedule: Vec<String> = block
        .select(&SCHEDULE_ANCHOR)
        .filter_map(|a| a.text().next())
        .map(str::to_string)
        .collect();
    schedule.sort();
    schedule
}

fn child_divs(container: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div")
}
