use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::info;
use crate::error::{Result, RosterError};
use crate::schedule::allocator::DEFAULT_DAILY_CAP;
use crate::schedule::{Allocation, Allocator, Calendar, StaffingRules, Worker};

/// Runtime settings, read from an optional JSON file.
/// Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub calendar: Calendar,
    pub staffing: StaffingRules,
    pub daily_cap: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calendar: Calendar::default(),
            staffing: StaffingRules::default(),
            daily_cap: DEFAULT_DAILY_CAP,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                let settings: Settings = serde_json::from_str(&raw)?;
                info!(path = %path.display(), "loaded settings");
                settings
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.calendar.validate()?;
        if self.daily_cap == 0 {
            return Err(RosterError::InvalidSettings("daily_cap must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Runs one allocation with these settings
    pub fn allocate(&self, workers: &[Worker]) -> Allocation {
        Allocator::new(&self.calendar, &self.staffing)
            .with_daily_cap(self.daily_cap)
            .allocate(workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::schedule::calendar::DayHours;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.daily_cap, 9);
    }

    #[test]
    fn test_partial_file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"calendar":{{"weekdays":{{"open":9,"close":21}},"sunday":{{"open":10,"close":20}}}},"daily_cap":8}}"#).unwrap();
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.calendar.weekdays, DayHours::new(9, 21));
        assert_eq!(settings.calendar.saturday, DayHours::new(10, 20));
        assert_eq!(settings.calendar.sunday, DayHours::new(10, 20));
        assert_eq!(settings.daily_cap, 8);
        assert_eq!(settings.staffing, StaffingRules::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"daily_cap":0}}"#).unwrap();
        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, RosterError::InvalidSettings(_)));
        assert_eq!(err.to_string(), "invalid settings: daily_cap must be at least 1");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(Settings::load(Some(file.path())), Err(RosterError::Json(_))));
    }

    #[test]
    fn test_allocate_uses_daily_cap() {
        let settings = Settings { daily_cap: 3, ..Settings::default() };
        let alloc = settings.allocate(&[Worker::new("Ana", 5)]);
        assert_eq!(alloc.assigned_hours("Ana"), Some(5));
        assert!(crate::schedule::Day::ALL
            .iter()
            .all(|&d| alloc.grid.count_for_worker_on_day("Ana", d) <= 3));
    }
}
