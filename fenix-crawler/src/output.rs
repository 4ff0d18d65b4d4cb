//! Newline-delimited JSON output.

use std::fs::File;
use std::io::{self, Write};

use crate::model::LineRecord;

/// Open the output destination: a file truncated for writing, or stdout
/// when `path` is `-`.
pub fn open_output(path: &str) -> io::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(File::create(path)?))
    }
}

/// Write every record as one line of JSON, in order, then flush.
///
/// Lines written before a failure stay on disk; there is no rollback.
pub fn write_records<W: Write>(mut writer: W, records: &[LineRecord]) -> io::Result<()> {
    for record in records {
        let line = serde_json::to_string(record).map_err(io::Error::other)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn record(id: &str) -> LineRecord {
        LineRecord {
            id: id.into(),
            number: "101".into(),
            name: "Centro".into(),
            starting_at: "TICEN".into(),
            starting_at_additional_info: None,
            searcheable_field: BTreeSet::from(["centro".to_string()]),
            timetables: BTreeMap::from([("1".to_string(), vec!["05:30".to_string()])]),
        }
    }

    #[test]
    fn one_json_object_per_line() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[record("101.0"), record("101.1")]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "101.0");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["id"], "101.1");
    }

    #[test]
    fn no_records_writes_nothing() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn open_output_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.jsonl");
        std::fs::write(&path, "old contents\n").unwrap();

        let path_str = path.to_str().unwrap();
        let mut out = open_output(path_str).unwrap();
        write_records(&mut out, &[record("101.0")]).unwrap();
        drop(out);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("old contents"));
        assert!(text.starts_with("{\"id\":\"101.0\""));
    }

    #[test]
    fn open_output_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("lines.jsonl");
        assert!(open_output(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn dash_means_stdout() {
        assert!(open_output("-").is_ok());
    }
}
