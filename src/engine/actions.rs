//! Gathering action loop: a chosen action repeats on a fixed duration,
//! granting its outputs and skill XP on every completion. Also handles the
//! offline path: a persisted loop is caught up in whole cycles (capped) and
//! the remainder carries into the live cycle.

use crate::model::{ActionDef, PlayerCharacter};

/// Hard cap on how much absence the action loop will pay out.
pub const MAX_OFFLINE_MS: u64 = 2 * 60 * 60 * 1000;

const MIN_CYCLE_MS: u64 = 500;
const FALLBACK_XP: u32 = 5;

#[derive(Clone, Debug)]
pub struct ActionRunner {
    action: ActionDef,
    cycle_started_at_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionProgress {
    pub percent: u8,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
}

/// What a poll or catch-up granted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycles: u64,
    pub xp: u64,
    pub leveled_up: bool,
    pub outputs: Vec<(String, u64)>,
}

impl ActionRunner {
    pub fn start(action: ActionDef, now_ms: u64) -> Self {
        Self {
            action,
            cycle_started_at_ms: now_ms,
        }
    }

    pub fn action(&self) -> &ActionDef {
        &self.action
    }

    pub fn started_at(&self) -> u64 {
        self.cycle_started_at_ms
    }

    fn cycle_ms(&self) -> u64 {
        self.action.duration_ms.max(MIN_CYCLE_MS)
    }

    pub fn progress(&self, now_ms: u64) -> ActionProgress {
        let duration = self.cycle_ms();
        let elapsed = now_ms.saturating_sub(self.cycle_started_at_ms).min(duration);
        ActionProgress {
            percent: (elapsed * 100 / duration).min(100) as u8,
            elapsed_ms: elapsed,
            remaining_ms: duration - elapsed,
        }
    }

    /// Grant every cycle completed since the last poll; the next cycle
    /// starts exactly where the last completed one ended.
    pub fn poll(&mut self, player: &mut PlayerCharacter, now_ms: u64) -> CycleReport {
        let duration = self.cycle_ms();
        let cycles = now_ms.saturating_sub(self.cycle_started_at_ms) / duration;
        if cycles == 0 {
            return CycleReport::default();
        }
        self.cycle_started_at_ms += cycles * duration;
        grant_cycles(player, &self.action, cycles)
    }

    /// Restore a loop that was running when the process went away. Absence
    /// beyond `MAX_OFFLINE_MS` is forfeited; partial-cycle progress inside
    /// the cap carries into the resumed cycle.
    pub fn resume(
        action: ActionDef,
        player: &mut PlayerCharacter,
        started_at_ms: u64,
        now_ms: u64,
    ) -> (Self, CycleReport) {
        let duration = action.duration_ms.max(MIN_CYCLE_MS);
        let elapsed = now_ms.saturating_sub(started_at_ms);
        let capped = elapsed.min(MAX_OFFLINE_MS);
        let cycles = capped / duration;
        let report = grant_cycles(player, &action, cycles);
        let runner = Self {
            action,
            cycle_started_at_ms: now_ms - (capped % duration),
        };
        (runner, report)
    }
}

fn grant_cycles(player: &mut PlayerCharacter, action: &ActionDef, cycles: u64) -> CycleReport {
    let mut report = CycleReport {
        cycles,
        ..CycleReport::default()
    };
    if cycles == 0 {
        return report;
    }

    for (key, qty) in &action.outputs {
        let total = (*qty).max(1) as u64 * cycles;
        grant_output(player, key, total);
        report.outputs.push((key.clone(), total));
    }

    let xp_per_cycle = if action.exp > 0 { action.exp } else { FALLBACK_XP } as u64;
    report.xp = xp_per_cycle * cycles;
    report.leveled_up = player.add_skill_xp(action.skill, report.xp);
    report
}

fn grant_output(player: &mut PlayerCharacter, key: &str, qty: u64) {
    if let Some(code) = key.strip_prefix("currency:") {
        player.add_currency(code, qty as i64);
    } else {
        player.add_item(key, qty as i64);
    }
}
