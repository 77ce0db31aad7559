use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::error::{Result, RosterError};
use crate::schedule::Worker;

/// One worker row as submitted, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerInput {
    pub name: String,
    pub hours: i64,
}

/// JSON body of a schedule request
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub workers: Vec<WorkerInput>,
}

const NAME_KEYS: [&str; 2] = ["names[]", "nombres[]"];
const HOURS_KEYS: [&str; 2] = ["hours[]", "horas[]"];

/// Validates submitted rows into workers, keeping their order
pub fn validate_workers(inputs: &[WorkerInput]) -> Result<Vec<Worker>> {
    let mut seen = HashSet::new();
    let mut workers = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(RosterError::InvalidWorker(format!("row {}: name is required", i + 1)));
        }
        if input.hours <= 0 {
            return Err(RosterError::InvalidWorker(format!(
                "{}: hours must be a positive number, got {}",
                name, input.hours
            )));
        }
        let hours = u32::try_from(input.hours)
            .map_err(|_| RosterError::InvalidWorker(format!("{}: hours out of range", name)))?;
        if !seen.insert(name.to_string()) {
            return Err(RosterError::InvalidWorker(format!("{} is listed more than once", name)));
        }
        workers.push(Worker::new(name, hours));
    }

    Ok(workers)
}

/// Parses the repeated `names[]` / `hours[]` fields of the HTML form
pub fn workers_from_form(pairs: &[(String, String)]) -> Result<Vec<Worker>> {
    let names: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| NAME_KEYS.contains(&k.as_str()))
        .map(|(_, v)| v.as_str())
        .collect();
    let hours: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| HOURS_KEYS.contains(&k.as_str()))
        .map(|(_, v)| v.as_str())
        .collect();

    if names.len() != hours.len() {
        return Err(RosterError::InvalidWorker(format!(
            "got {} names but {} hour values",
            names.len(),
            hours.len()
        )));
    }

    let inputs = names
        .iter()
        .zip(hours.iter())
        .map(|(name, raw)| -> Result<WorkerInput> {
            let hours = raw.trim().parse::<i64>().map_err(|_| {
                RosterError::InvalidWorker(format!("{}: '{}' is not a whole number of hours", name.trim(), raw))
            })?;
            Ok(WorkerInput {
                name: name.to_string(),
                hours,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    validate_workers(&inputs)
}
