use serde::Serialize;
use super::allocator::{Allocation, WorkerOutcome};
use super::calendar::Calendar;
use super::staffing::StaffingPolicy;
use super::types::{Day, Hour};

/// A slot that ended below its staffing target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnderstaffedSlot {
    pub day: Day,
    pub hour: Hour,
    pub present: u32,
    pub target: u32,
}

/// Summary of how far an allocation got towards the staffing targets
/// and the workers' requested hours
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total_slots: usize,
    pub understaffed: Vec<UnderstaffedSlot>,
    pub workers: Vec<WorkerOutcome>,
    pub assigned_hours: u32,
    pub requested_hours: u32,
}

impl CoverageReport {
    pub fn build<P: StaffingPolicy + ?Sized>(allocation: &Allocation, calendar: &Calendar, policy: &P) -> Self {
        let understaffed = calendar
            .slots()
            .filter_map(|(day, hour)| {
                let present = allocation.grid.count_at(day, hour);
                let target = policy.target(day, hour);
                (present < target).then_some(UnderstaffedSlot { day, hour, present, target })
            })
            .collect();

        Self {
            total_slots: calendar.slot_count(),
            understaffed,
            workers: allocation.outcomes.clone(),
            assigned_hours: allocation.outcomes.iter().map(|o| o.assigned).sum(),
            requested_hours: allocation.outcomes.iter().map(|o| o.requested).sum(),
        }
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.understaffed.is_empty()
    }

    pub fn missing_staff_hours(&self) -> u32 {
        self.understaffed.iter().map(|s| s.target - s.present).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::allocator::Allocator;
    use crate::schedule::staffing::{StaffingRules, UniformStaffing};
    use crate::schedule::types::Worker;

    #[test]
    fn test_empty_allocation_is_all_understaffed() {
        let cal = Calendar::default();
        let rules = StaffingRules::default();
        let alloc = Allocator::new(&cal, &rules).allocate(&[]);
        let report = CoverageReport::build(&alloc, &cal, &rules);
        assert_eq!(report.understaffed.len(), cal.slot_count());
        assert_eq!(report.assigned_hours, 0);
        assert!(!report.is_fully_staffed());
        assert_eq!(report.understaffed[0], UnderstaffedSlot { day: Day::Monday, hour: 9, present: 0, target: 1 });
    }

    #[test]
    fn test_full_coverage() {
        let cal = Calendar::uniform(9, 12);
        let policy = UniformStaffing(1);
        let workers: Vec<Worker> = (0..4).map(|i| Worker::new(format!("W{}", i), 7)).collect();
        let alloc = Allocator::new(&cal, &policy).allocate(&workers);
        let report = CoverageReport::build(&alloc, &cal, &policy);
        assert!(report.is_fully_staffed());
        assert_eq!(report.missing_staff_hours(), 0);
        assert_eq!(report.assigned_hours, 28);
        assert_eq!(report.requested_hours, 28);
    }

    #[test]
    fn test_missing_staff_hours() {
        let cal = Calendar::uniform(9, 10);
        let policy = UniformStaffing(2);
        let alloc = Allocator::new(&cal, &policy).allocate(&[Worker::new("Ana", 14)]);
        let report = CoverageReport::build(&alloc, &cal, &policy);
        assert_eq!(report.understaffed.len(), 14);
        assert_eq!(report.missing_staff_hours(), 14);
        assert!(report.understaffed.iter().all(|s| s.present == 1));
    }
}
