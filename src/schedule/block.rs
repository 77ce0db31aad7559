use super::calendar::Calendar;
use super::grid::ScheduleGrid;
use super::staffing::StaffingPolicy;
use super::types::{Block, Day, Hour};

/// Finds the longest run of consecutive hours on `day` that are still
/// understaffed and that `worker` does not already occupy.
///
/// Among runs of equal length the earliest one is kept. Returns
/// [`Block::EMPTY`] when no eligible hour exists.
pub fn find_longest_block<P: StaffingPolicy + ?Sized>(
    day: Day,
    calendar: &Calendar,
    grid: &ScheduleGrid,
    policy: &P,
    worker: &str,
) -> Block {
    let mut best = Block::EMPTY;
    let mut current: Option<Block> = None;
    let mut previous: Option<Hour> = None;

    for hour in calendar.hours(day) {
        let eligible = policy.needs_more(day, hour, grid.count_at(day, hour))
            && !grid.contains_worker(day, hour, worker);
        let adjacent = previous.map(|p| p + 1 == hour).unwrap_or(false);
        previous = Some(hour);

        match current.as_mut() {
            Some(run) if eligible && adjacent => {
                run.end = hour;
                run.length += 1;
            }
            _ => {
                close_run(&mut best, current.take());
                if eligible {
                    current = Some(Block { start: hour, end: hour, length: 1 });
                }
            }
        }
    }
    close_run(&mut best, current);

    best
}

fn close_run(best: &mut Block, run: Option<Block>) {
    if let Some(run) = run {
        if run.length > best.length {
            *best = run;
        }
    }
}
