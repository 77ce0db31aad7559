use std::fs::File;
use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;
use crate::error::Result;
use crate::schedule::{hour_label, ScheduleGrid};

/// Writes the grid as `day,hour,workers` rows, workers joined by `;`.
/// The first line is a `#` comment carrying the generation time.
pub fn export_schedule_to_csv(grid: &ScheduleGrid, csv_path: &Path) -> Result<()> {
    let file = File::create(csv_path)?;
    write_schedule_csv(grid, file)
}

pub fn write_schedule_csv<W: Write>(grid: &ScheduleGrid, mut out: W) -> Result<()> {
    writeln!(out, "# generated_at {}", chrono::Utc::now().to_rfc3339())?;

    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(["day", "hour", "workers"])?;
    for ((day, hour), names) in grid.slots() {
        wtr.write_record([day.name(), hour_label(hour).as_str(), names.join(";").as_str()])?;
    }
    wtr.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Calendar, Day};

    #[test]
    fn test_csv_layout() {
        let mut grid = ScheduleGrid::new(&Calendar::uniform(9, 10));
        grid.append(Day::Monday, 9, "Ana").unwrap();
        grid.append(Day::Monday, 9, "Luis").unwrap();

        let mut buf = Vec::new();
        write_schedule_csv(&grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("# generated_at "));
        assert_eq!(lines[1], "day,hour,workers");
        assert_eq!(lines[2], "Monday,09:00,Ana;Luis");
        assert_eq!(lines[3], "Monday,10:00,");
        assert_eq!(lines.len(), 2 + 14);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        let grid = ScheduleGrid::new(&Calendar::default());
        export_schedule_to_csv(&grid, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Sunday,19:00,"));
        assert!(!text.contains("Sunday,20:00"));
    }
}
