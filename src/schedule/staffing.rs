use serde::{Serialize, Deserialize};
use super::types::{Day, Hour};

/// Decides whether a slot still wants more staff
pub trait StaffingPolicy {
    /// Minimum head count considered sufficient for the slot
    fn target(&self, day: Day, hour: Hour) -> u32;

    /// True while `current_count` is below the slot's target
    fn needs_more(&self, day: Day, hour: Hour, current_count: u32) -> bool {
        current_count < self.target(day, hour)
    }
}

/// One row of the staffing table. Matches when the day is in `days`
/// (any day if `None`) and `from <= hour < until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRule {
    #[serde(default)]
    pub days: Option<Vec<Day>>,
    pub from: Hour,
    pub until: Hour,
    pub min_staff: u32,
}

impl StaffingRule {
    fn matches(&self, day: Day, hour: Hour) -> bool {
        let day_ok = self.days.as_ref().map(|d| d.contains(&day)).unwrap_or(true);
        day_ok && hour >= self.from && hour < self.until
    }
}

/// Ordered rule table, first matching rule wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRules {
    pub rules: Vec<StaffingRule>,
    pub default_min: u32,
}

impl Default for StaffingRules {
    fn default() -> Self {
        let weekdays = Day::ALL.iter().copied().filter(Day::is_weekday).collect();
        Self {
            rules: vec![
                // weekday opening hour
                StaffingRule { days: Some(weekdays), from: 9, until: 10, min_staff: 1 },
                // lunch
                StaffingRule { days: None, from: 12, until: 14, min_staff: 3 },
                StaffingRule { days: Some(vec![Day::Sunday]), from: 17, until: 19, min_staff: 2 },
                // evening peak
                StaffingRule { days: None, from: 17, until: 19, min_staff: 3 },
            ],
            default_min: 2,
        }
    }
}

impl StaffingPolicy for StaffingRules {
    fn target(&self, day: Day, hour: Hour) -> u32 {
        self.rules
            .iter()
            .find(|r| r.matches(day, hour))
            .map(|r| r.min_staff)
            .unwrap_or(self.default_min)
    }
}

/// Same minimum in every slot
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformStaffing(pub u32);

#[cfg(test)]
impl StaffingPolicy for UniformStaffing {
    fn target(&self, _day: Day, _hour: Hour) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_opening_needs_one() {
        let rules = StaffingRules::default();
        assert!(rules.needs_more(Day::Monday, 9, 0));
        assert!(!rules.needs_more(Day::Monday, 9, 1));
        assert!(!rules.needs_more(Day::Friday, 9, 1));
    }

    #[test]
    fn test_weekend_opening_falls_to_default() {
        let rules = StaffingRules::default();
        assert_eq!(rules.target(Day::Saturday, 9), 2);
        assert_eq!(rules.target(Day::Sunday, 10), 2);
    }

    #[test]
    fn test_lunch_needs_three() {
        let rules = StaffingRules::default();
        assert_eq!(rules.target(Day::Wednesday, 12), 3);
        assert_eq!(rules.target(Day::Sunday, 13), 3);
        assert_eq!(rules.target(Day::Wednesday, 14), 2);
        assert!(rules.needs_more(Day::Tuesday, 13, 2));
        assert!(!rules.needs_more(Day::Tuesday, 13, 3));
    }

    #[test]
    fn test_evening_peak_is_lower_on_sunday() {
        let rules = StaffingRules::default();
        assert_eq!(rules.target(Day::Sunday, 17), 2);
        assert_eq!(rules.target(Day::Sunday, 18), 2);
        assert_eq!(rules.target(Day::Saturday, 18), 3);
        assert_eq!(rules.target(Day::Monday, 17), 3);
        assert_eq!(rules.target(Day::Monday, 19), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = StaffingRules {
            rules: vec![
                StaffingRule { days: None, from: 10, until: 12, min_staff: 5 },
                StaffingRule { days: None, from: 10, until: 11, min_staff: 1 },
            ],
            default_min: 2,
        };
        assert_eq!(rules.target(Day::Monday, 10), 5);
        assert_eq!(rules.target(Day::Monday, 12), 2);
    }

    #[test]
    fn test_uniform() {
        let policy = UniformStaffing(1);
        assert!(policy.needs_more(Day::Thursday, 15, 0));
        assert!(!policy.needs_more(Day::Thursday, 15, 1));
    }
}
