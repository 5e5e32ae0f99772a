/*!
`akthos_idle` — a deterministic idle-RPG core.

What it does
- Simulates auto-battle encounters (attack timers, crits, elements, status
  effects) advanced by caller-supplied time.
- Runs gathering actions on a fixed cycle and pays out offline absence,
  capped, with partial-cycle progress carried over.
- Tracks skills on a geometric XP curve, currencies, inventory, equipment,
  pending combat loot, and slayer tasks.
- Persists versioned JSON snapshots and reconciles local vs remote copies
  by freshness.

How to use (call surface only)
- Parse a `data::content::GameContent` pack from JSON.
- Build a `Game` with a seed; drive it with milliseconds:
  `combat_tick(now_ms)`, `poll_action(now_ms)`, `catch_up(now_ms)`.
- Persist via `Game::snapshot(now_ms)` and a `data::save::SaveStore`;
  merge devices with `data::sync::reconcile`.

What it does NOT do
- No UI, no networking, no clocks, no global RNG. You supply time and seeds,
  which makes every run reproducible.
*/

pub mod data;
pub mod engine;
pub mod game;
pub mod model;
pub mod rules;
pub mod services;

pub use game::Game;
