pub mod submission;
pub mod export;

pub use submission::{ScheduleRequest, WorkerInput, validate_workers, workers_from_form};
pub use export::export_schedule_to_csv;
