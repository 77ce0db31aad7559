use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Day of the operating week, in fixed week order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All seven days, Monday first
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn is_weekday(&self) -> bool {
        !matches!(self, Day::Saturday | Day::Sunday)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Day::ALL
            .iter()
            .find(|d| d.name().to_lowercase() == lower)
            .copied()
            .ok_or_else(|| format!("unknown day: {}", s))
    }
}

/// Hour of day a slot starts at (0-23)
pub type Hour = u8;

/// Composite key addressing one slot of the week
pub type SlotKey = (Day, Hour);

/// A worker to be rostered. Never mutated during allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    #[serde(alias = "hours")]
    pub target_hours: u32,
}

impl Worker {
    pub fn new(name: impl Into<String>, target_hours: u32) -> Self {
        Self {
            name: name.into(),
            target_hours,
        }
    }
}

/// A contiguous run of hours on one day, `end` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: Hour,
    pub end: Hour,
    pub length: u32,
}

impl Block {
    /// Zero-length sentinel returned when no run exists
    pub const EMPTY: Block = Block { start: 0, end: 0, length: 0 };

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
