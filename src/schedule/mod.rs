pub mod types;
pub mod calendar;
pub mod staffing;
pub mod grid;
pub mod block;
pub mod allocator;
pub mod coverage;

pub use types::{Day, Hour, Worker};
pub use calendar::{Calendar, hour_label};
pub use staffing::{StaffingPolicy, StaffingRules};
pub use grid::ScheduleGrid;
pub use allocator::{Allocation, Allocator, WorkerOutcome};
pub use coverage::CoverageReport;
