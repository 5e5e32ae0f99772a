// demos/afk_catchup.rs
// Run with:
//   cargo run --example afk_catchup

use akthos_idle::Game;
use akthos_idle::data::content::GameContent;
use akthos_idle::model::{Job, SkillId};

const PACK: &str = include_str!("../assets/game.json");
const HOUR_MS: u64 = 60 * 60 * 1000;

fn main() {
    env_logger::init();

    let content = GameContent::load(PACK).expect("content pack should parse");
    let mut game = Game::new(content, 42);

    // Leave a chopping loop and a passive job running, then "close the app".
    game.start_action("chop_oak", 0).expect("unlocked");
    game.add_job(Job {
        interval_ms: 60_000,
        xp_per_tick: 3,
        currency_per_tick: 1,
        ..Job::default()
    });
    let save = game.snapshot(0);

    // Three hours pass; the action loop only pays out its two-hour cap.
    let content = GameContent::load(PACK).expect("content pack should parse");
    let mut restored = Game::from_save(content, save, 42);
    let report = restored.catch_up(3 * HOUR_MS);

    println!("away for {} min", report.elapsed_ms / 60_000);
    println!("job ticks accrued: {}", report.job_ticks);
    if let Some(action) = &report.action {
        println!(
            "chopping paid out {} cycles (+{} xp, level-up: {})",
            action.cycles, action.xp, action.leveled_up
        );
        for (id, qty) in &action.outputs {
            println!("  +{qty}x {id}");
        }
    }
    println!(
        "woodcutting is now level {} ({} xp)",
        restored.skill_level(SkillId::Woodcutting),
        restored.skill_xp(SkillId::Woodcutting)
    );
}
