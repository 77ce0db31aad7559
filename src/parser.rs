use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::form::{validate_workers, WorkerInput};
use crate::schedule::Worker;

/// Finds a column whose header contains one of `needles`, case-insensitive,
/// never returning `skip`
fn find_column(headers: &StringRecord, needles: &[&str], skip: Option<usize>) -> Option<usize> {
    headers.iter().enumerate().position(|(i, h)| {
        let lower = h.trim().to_lowercase();
        Some(i) != skip && needles.iter().any(|n| lower.contains(n))
    })
}

/// Loads a worker roster from a CSV file with a name column and an hours column
///
/// Headers are matched loosely ("name"/"nombre", "hours"/"horas"); when none
/// match, the first columns not already taken are used. Blank rows are skipped. The roster
/// keeps file order, which is the tie-break order for equal hours.
pub fn load_workers<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Worker>> {
    let file = std::fs::File::open(csv_path)?;
    read_workers(file)
}

pub fn read_workers<R: Read>(source: R) -> Result<Vec<Worker>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, &["name", "nombre"], None).unwrap_or(0);
    let hours_col = find_column(&headers, &["hour", "hora"], Some(name_col))
        .unwrap_or(if name_col == 0 { 1 } else { 0 });

    let mut inputs = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let name = record.get(name_col).unwrap_or("").trim();
        let raw_hours = record.get(hours_col).unwrap_or("").trim();

        if name.is_empty() && raw_hours.is_empty() {
            continue;
        }

        let hours = raw_hours.parse::<i64>().map_err(|_| {
            RosterError::InvalidWorker(format!("line {}: '{}' is not a whole number of hours", line, raw_hours))
        })?;
        inputs.push(WorkerInput {
            name: name.to_string(),
            hours,
        });
    }

    debug!(rows = inputs.len(), "read roster rows");
    validate_workers(&inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_named_columns_in_any_order() {
        let data = "Weekly hours,Worker name\n30,Ana\n12,Luis\n";
        let workers = read_workers(data.as_bytes()).unwrap();
        assert_eq!(workers, vec![Worker::new("Ana", 30), Worker::new("Luis", 12)]);
    }

    #[test]
    fn test_spanish_headers() {
        let data = "nombre,horas\nMarta,20\n";
        assert_eq!(read_workers(data.as_bytes()).unwrap(), vec![Worker::new("Marta", 20)]);
    }

    #[test]
    fn test_falls_back_to_first_two_columns() {
        let data = "who,how much\nAna,5\n";
        assert_eq!(read_workers(data.as_bytes()).unwrap(), vec![Worker::new("Ana", 5)]);
    }

    #[test]
    fn test_skips_blank_rows() {
        let data = "name,hours\nAna,5\n,\nLuis,6\n";
        assert_eq!(read_workers(data.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_reports_line_of_bad_hours() {
        let data = "name,hours\nAna,5\nLuis,lots\n";
        let err = read_workers(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_hours_column_never_reuses_name_column() {
        let data = "who,name\n7,Ana\n";
        assert_eq!(read_workers(data.as_bytes()).unwrap(), vec![Worker::new("Ana", 7)]);
    }

    #[test]
    fn test_line_number_survives_blank_lines() {
        let data = "name,hours\nAna,5\n\n\nLuis,lots\n";
        let err = read_workers(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 5"), "{}", err);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "name,hours\nAna,40\n").unwrap();
        assert_eq!(load_workers(&path).unwrap(), vec![Worker::new("Ana", 40)]);
        assert!(load_workers(dir.path().join("missing.csv")).is_err());
    }
}
