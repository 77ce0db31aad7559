use serde::{Serialize, Deserialize};
use crate::error::RosterError;
use super::types::{Day, Hour, SlotKey};

/// Opening hours of one day. Both bounds are slot start hours, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: Hour,
    pub close: Hour,
}

impl DayHours {
    pub const fn new(open: Hour, close: Hour) -> Self {
        Self { open, close }
    }
}

/// Weekly operating calendar, one hour range per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    pub weekdays: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            weekdays: DayHours::new(9, 20),
            saturday: DayHours::new(10, 20),
            sunday: DayHours::new(10, 19),
        }
    }
}

impl Calendar {
    /// Same hours on every day of the week
    #[cfg(test)]
    pub fn uniform(open: Hour, close: Hour) -> Self {
        let hours = DayHours::new(open, close);
        Self {
            weekdays: hours,
            saturday: hours,
            sunday: hours,
        }
    }

    pub fn day_hours(&self, day: Day) -> DayHours {
        match day {
            Day::Saturday => self.saturday,
            Day::Sunday => self.sunday,
            _ => self.weekdays,
        }
    }

    /// Ordered, strictly increasing slot hours of `day`
    pub fn hours(&self, day: Day) -> Vec<Hour> {
        let DayHours { open, close } = self.day_hours(day);
        (open..=close).collect()
    }

    #[cfg(test)]
    pub fn contains(&self, day: Day, hour: Hour) -> bool {
        let DayHours { open, close } = self.day_hours(day);
        hour >= open && hour <= close
    }

    /// Every valid slot, in week order then hour order
    pub fn slots(&self) -> impl Iterator<Item = SlotKey> + '_ {
        Day::ALL
            .iter()
            .flat_map(move |&day| self.hours(day).into_iter().map(move |h| (day, h)))
    }

    pub fn slot_count(&self) -> usize {
        Day::ALL.iter().map(|&d| self.hours(d).len()).sum()
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        for (label, hours) in [
            ("weekdays", self.weekdays),
            ("saturday", self.saturday),
            ("sunday", self.sunday),
        ] {
            if hours.open > hours.close {
                return Err(RosterError::InvalidCalendar(format!(
                    "{} opens at {} after closing at {}",
                    label, hours.open, hours.close
                )));
            }
            if hours.close > 23 {
                return Err(RosterError::InvalidCalendar(format!(
                    "{} closing hour {} is past 23",
                    label, hours.close
                )));
            }
        }
        Ok(())
    }
}

/// Formats a slot hour for display, e.g. 9 -> "09:00"
pub fn hour_label(hour: Hour) -> String {
    format!("{:02}:00", hour)
}
