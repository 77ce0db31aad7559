//! Greedy weekly allocation.
//!
//! Workers are served one at a time, largest weekly target first. Each
//! worker repeatedly takes the best understaffed block across the week
//! until their target is met or nothing usable remains. A worker that runs
//! out of blocks keeps the partial assignment; that is reported, never an
//! error.

use serde::Serialize;
use tracing::{debug, info, warn};
use super::block::find_longest_block;
use super::calendar::Calendar;
use super::grid::ScheduleGrid;
use super::staffing::StaffingPolicy;
use super::types::{Block, Day, Hour, Worker};

/// Most hours one worker may be given on a single day
pub const DEFAULT_DAILY_CAP: u32 = 9;

/// How a worker's allocation loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    /// Target reached
    Done,
    /// No feasible block left; the target was only partly met
    Stuck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerOutcome {
    pub name: String,
    pub requested: u32,
    pub assigned: u32,
    pub status: WorkerStatus,
}

impl WorkerOutcome {
    pub fn shortfall(&self) -> u32 {
        self.requested.saturating_sub(self.assigned)
    }
}

/// One committed block, in commit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commit<'w> {
    pub worker: &'w str,
    pub day: Day,
    pub start: Hour,
    pub hours: u32,
}

/// Result of one allocation run
#[derive(Debug, Clone)]
pub struct Allocation {
    pub grid: ScheduleGrid,
    /// Input workers, in the order they were given
    pub workers: Vec<Worker>,
    /// Per-worker outcome, in input order
    pub outcomes: Vec<WorkerOutcome>,
    commits: Vec<(usize, Day, Hour, u32)>,
}

impl Allocation {
    pub fn assigned_hours(&self, name: &str) -> Option<u32> {
        self.outcomes.iter().find(|o| o.name == name).map(|o| o.assigned)
    }

    /// Workers that ended below their requested hours
    pub fn shortfalls(&self) -> impl Iterator<Item = &WorkerOutcome> + '_ {
        self.outcomes.iter().filter(|o| o.shortfall() > 0)
    }

    pub fn commits(&self) -> impl Iterator<Item = Commit<'_>> + '_ {
        self.commits.iter().map(|&(idx, day, start, hours)| Commit {
            worker: self.workers[idx].name.as_str(),
            day,
            start,
            hours,
        })
    }
}

pub struct Allocator<'a, P: StaffingPolicy + ?Sized> {
    calendar: &'a Calendar,
    policy: &'a P,
    daily_cap: u32,
}

impl<'a, P: StaffingPolicy + ?Sized> Allocator<'a, P> {
    pub fn new(calendar: &'a Calendar, policy: &'a P) -> Self {
        Self {
            calendar,
            policy,
            daily_cap: DEFAULT_DAILY_CAP,
        }
    }

    pub fn with_daily_cap(mut self, daily_cap: u32) -> Self {
        self.daily_cap = daily_cap;
        self
    }

    /// Builds a fresh schedule for `workers`. Deterministic for a given input order.
    pub fn allocate(&self, workers: &[Worker]) -> Allocation {
        let mut grid = ScheduleGrid::new(self.calendar);

        // Stable: equal targets keep their input order
        let mut order: Vec<usize> = (0..workers.len()).collect();
        order.sort_by(|&a, &b| workers[b].target_hours.cmp(&workers[a].target_hours));

        let mut outcomes: Vec<Option<WorkerOutcome>> = vec![None; workers.len()];
        let mut commits = Vec::new();

        for idx in order {
            let worker = &workers[idx];
            let mut assigned = 0u32;
            let status = loop {
                if assigned >= worker.target_hours {
                    break WorkerStatus::Done;
                }
                let Some((day, block, feasible)) = self.best_block(&grid, worker, assigned) else {
                    break WorkerStatus::Stuck;
                };
                let placed = self.commit(&mut grid, worker, day, block, feasible);
                if placed == 0 {
                    break WorkerStatus::Stuck;
                }
                debug!(
                    worker = %worker.name,
                    day = %day,
                    start = block.start,
                    hours = placed,
                    "committed block"
                );
                commits.push((idx, day, block.start, placed));
                assigned += placed;
            };

            if status == WorkerStatus::Stuck {
                warn!(
                    worker = %worker.name,
                    requested = worker.target_hours,
                    assigned,
                    "no feasible block left, target partly met"
                );
            }
            outcomes[idx] = Some(WorkerOutcome {
                name: worker.name.clone(),
                requested: worker.target_hours,
                assigned,
                status,
            });
        }

        info!(
            workers = workers.len(),
            blocks = commits.len(),
            "allocation finished"
        );

        Allocation {
            grid,
            workers: workers.to_vec(),
            outcomes: outcomes.into_iter().flatten().collect(),
            commits,
        }
    }

    /// Picks the day whose block allows the most committable hours.
    /// Ties go to the earlier day.
    fn best_block(&self, grid: &ScheduleGrid, worker: &Worker, assigned: u32) -> Option<(Day, Block, u32)> {
        let remaining = worker.target_hours.saturating_sub(assigned);
        let mut best: Option<(Day, Block, u32)> = None;

        for day in Day::ALL {
            let today = grid.count_for_worker_on_day(&worker.name, day);
            if today >= self.daily_cap {
                continue;
            }
            let block = find_longest_block(day, self.calendar, grid, self.policy, &worker.name);
            if block.is_empty() {
                continue;
            }
            let feasible = block.length.min(self.daily_cap - today).min(remaining);
            let best_so_far = best.map(|(_, _, f)| f).unwrap_or(0);
            if feasible > best_so_far {
                best = Some((day, block, feasible));
            }
        }

        best
    }

    /// Places the worker in the first `feasible` hours of the block.
    /// Returns how many hours were actually placed.
    fn commit(&self, grid: &mut ScheduleGrid, worker: &Worker, day: Day, block: Block, feasible: u32) -> u32 {
        let mut placed = 0;
        for hour in (block.start..=block.end).take(feasible as usize) {
            match grid.append(day, hour, &worker.name) {
                Ok(()) => placed += 1,
                Err(e) => debug!(worker = %worker.name, "skipped hour: {}", e),
            }
        }
        placed
    }
}
