//! Assembly of parsed lines into output records.

use std::collections::BTreeSet;

use crate::model::{LineRecord, ParsedLine};
use crate::tokenize::normalize;

/// Flatten a parsed line into one [`LineRecord`] per starting point.
///
/// Records come out in the line's starting-point order; the zero-based
/// position doubles as the record id suffix ("{number}.{index}"), so ids
/// are stable within a run but not across runs. The search field is the
/// de-duplicated union of normalized tokens from the line name, the
/// starting point and the additional info.
pub fn assemble(line: &ParsedLine) -> Vec<LineRecord> {
    line.timetables
        .iter()
        .enumerate()
        .map(|(index, timetable)| {
            let mut tokens: BTreeSet<String> = normalize(&line.name).into_iter().collect();
            tokens.extend(normalize(&timetable.starting_at));
            if let Some(info) = &timetable.additional_info {
                tokens.extend(normalize(info));
            }

            LineRecord {
                id: format!("{}.{}", line.number, index),
                number: line.number.clone(),
                name: line.name.clone(),
                starting_at: timetable.starting_at.clone(),
                starting_at_additional_info: timetable.additional_info.clone(),
                searcheable_field: tokens,
                timetables: timetable.schedules.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::model::StartingPointTimetable;

    use super::*;

    fn timetable(starting_at: &str, info: Option<&str>) -> StartingPointTimetable {
        StartingPointTimetable {
            starting_at: starting_at.into(),
            additional_info: info.map(Into::into),
            schedules: BTreeMap::from([("1".to_string(), vec!["05:30".to_string()])]),
        }
    }

    fn line(timetables: Vec<StartingPointTimetable>) -> ParsedLine {
        ParsedLine {
            number: "101".into(),
            name: "São Paulo".into(),
            timetables,
        }
    }

    #[test]
    fn one_record_per_starting_point_with_sequential_ids() {
        let records = assemble(&line(vec![
            timetable("TICEN", None),
            timetable("TILAG", None),
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "101.0");
        assert_eq!(records[0].starting_at, "TICEN");
        assert_eq!(records[1].id, "101.1");
        assert_eq!(records[1].starting_at, "TILAG");
    }

    #[test]
    fn search_field_unions_normalized_tokens() {
        let records = assemble(&line(vec![timetable("Vila Nova", None)]));
        let field = &records[0].searcheable_field;

        assert!(field.contains("sao"));
        assert!(field.contains("paulo"));
        assert!(field.contains("vila"));
        assert!(field.contains("nova"));
        assert!(!field.contains("São"));
    }

    #[test]
    fn search_field_deduplicates_across_fields() {
        let mut parsed = line(vec![timetable("São Paulo", None)]);
        parsed.name = "São Paulo".into();

        let records = assemble(&parsed);
        assert_eq!(
            records[0].searcheable_field,
            BTreeSet::from(["sao".to_string(), "paulo".to_string()])
        );
    }

    #[test]
    fn additional_info_feeds_search_but_not_timetables() {
        let records = assemble(&line(vec![timetable("TICEN", Some("Feriados"))]));

        assert_eq!(records[0].starting_at_additional_info.as_deref(), Some("Feriados"));
        assert!(records[0].searcheable_field.contains("feriados"));
        // The output timetable map carries day kinds only.
        assert_eq!(records[0].timetables.keys().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn line_without_timetables_yields_no_records() {
        assert!(assemble(&line(vec![])).is_empty());
    }
}
