//! The schedule entity: every slot of the calendar mapped to the ordered
//! list of workers present there.
//!
//! All mutation goes through [`ScheduleGrid::append`], which is where the
//! one-entry-per-worker-per-slot rule is enforced.

use std::collections::BTreeMap;
use crate::error::RosterError;
use super::calendar::Calendar;
use super::types::{Day, Hour, SlotKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    slots: BTreeMap<SlotKey, Vec<String>>,
}

impl ScheduleGrid {
    /// Creates a grid with an empty list for every slot of `calendar`
    pub fn new(calendar: &Calendar) -> Self {
        Self {
            slots: calendar.slots().map(|key| (key, Vec::new())).collect(),
        }
    }

    /// Workers in the slot, in assignment order. `None` outside the calendar.
    pub fn get(&self, day: Day, hour: Hour) -> Option<&[String]> {
        self.slots.get(&(day, hour)).map(Vec::as_slice)
    }

    pub fn contains_worker(&self, day: Day, hour: Hour, name: &str) -> bool {
        self.get(day, hour)
            .map(|names| names.iter().any(|n| n == name))
            .unwrap_or(false)
    }

    /// Adds `name` to the end of the slot's list
    pub fn append(&mut self, day: Day, hour: Hour, name: &str) -> Result<(), RosterError> {
        let names = self
            .slots
            .get_mut(&(day, hour))
            .ok_or(RosterError::SlotOutOfRange { day, hour })?;
        if names.iter().any(|n| n == name) {
            return Err(RosterError::DuplicateAssignment {
                name: name.to_string(),
                day,
                hour,
            });
        }
        names.push(name.to_string());
        Ok(())
    }

    /// Head count of the slot, 0 outside the calendar
    pub fn count_at(&self, day: Day, hour: Hour) -> u32 {
        self.get(day, hour).map(|n| n.len() as u32).unwrap_or(0)
    }

    pub fn count_for_worker_on_day(&self, name: &str, day: Day) -> u32 {
        self.slots
            .range((day, Hour::MIN)..=(day, Hour::MAX))
            .filter(|(_, names)| names.iter().any(|n| n == name))
            .count() as u32
    }

    #[cfg(test)]
    pub fn hours_for_worker(&self, name: &str) -> u32 {
        self.slots
            .values()
            .filter(|names| names.iter().any(|n| n == name))
            .count() as u32
    }

    /// Every slot in week order, then hour order
    pub fn slots(&self) -> impl Iterator<Item = (SlotKey, &[String])> + '_ {
        self.slots.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Slots of one day, in hour order
    pub fn day_slots(&self, day: Day) -> impl Iterator<Item = (Hour, &[String])> + '_ {
        self.slots
            .range((day, Hour::MIN)..=(day, Hour::MAX))
            .map(|((_, h), v)| (*h, v.as_slice()))
    }

    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when no worker is assigned anywhere
    pub fn is_empty_assignment(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}
