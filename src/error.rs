use thiserror::Error;
use crate::schedule::{Day, Hour};

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid worker input: {0}")]
    InvalidWorker(String),
    #[error("{day} {hour}:00 is outside the calendar")]
    SlotOutOfRange { day: Day, hour: Hour },
    #[error("{name} is already assigned to {day} {hour}:00")]
    DuplicateAssignment { name: String, day: Day, hour: Hour },
}

pub type Result<T> = std::result::Result<T, RosterError>;
