/// Job catch-up: converts elapsed wall time into whole reward ticks,
/// keeping the remainder as live progress.
use crate::model::Job;

/// Advance one job by `delta_ms`. Returns the number of ticks awarded.
pub fn apply_job_progress(job: &mut Job, delta_ms: u64) -> u64 {
    if job.interval_ms == 0 {
        return 0;
    }
    let total = job.progress_ms + delta_ms;
    let ticks = total / job.interval_ms;
    job.progress_ms = total % job.interval_ms;
    job.accumulated_xp += job.xp_per_tick as u64 * ticks;
    job.accumulated_currency += job.currency_per_tick as u64 * ticks;
    ticks
}

/// Catch every job up from `last_seen_ms` to `now_ms`. A clock that moved
/// backwards counts as no elapsed time. Returns total ticks awarded.
pub fn catch_up_jobs(jobs: &mut [Job], last_seen_ms: u64, now_ms: u64) -> u64 {
    let delta = now_ms.saturating_sub(last_seen_ms);
    jobs.iter_mut()
        .map(|job| apply_job_progress(job, delta))
        .sum()
}
