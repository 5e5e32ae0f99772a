// tests/offline.rs
use akthos_idle::Game;
use akthos_idle::data::content::GameContent;
use akthos_idle::engine::actions::{ActionRunner, MAX_OFFLINE_MS};
use akthos_idle::engine::offline;
use akthos_idle::model::{ActionDef, Job, PlayerCharacter, SkillId};

const PACK: &str = include_str!("../assets/game.json");

fn chopping() -> ActionDef {
    ActionDef {
        id: "chop".to_string(),
        name: "Chop".to_string(),
        skill: SkillId::Woodcutting,
        duration_ms: 3_000,
        exp: 8,
        outputs: [("oak_log".to_string(), 1)].into_iter().collect(),
        req_level: 1,
    }
}

/* ──────────────────────────────────────────────────────────────────────────
Job catch-up
────────────────────────────────────────────────────────────────────────── */

#[test]
fn jobs_award_whole_ticks_on_catchup() {
    let mut jobs = vec![Job {
        interval_ms: 1_000,
        xp_per_tick: 5,
        currency_per_tick: 2,
        ..Job::default()
    }];
    let ticks = offline::catch_up_jobs(&mut jobs, 0, 3_000);
    assert_eq!(ticks, 3);
    assert_eq!(jobs[0].accumulated_xp, 15);
    assert_eq!(jobs[0].accumulated_currency, 6);
    assert_eq!(jobs[0].progress_ms, 0);
}

#[test]
fn job_progress_keeps_the_remainder() {
    let mut job = Job {
        interval_ms: 1_000,
        xp_per_tick: 5,
        currency_per_tick: 2,
        ..Job::default()
    };
    let ticks = offline::apply_job_progress(&mut job, 2_500);
    assert_eq!(ticks, 2);
    assert_eq!(job.progress_ms, 500);
    assert_eq!(job.accumulated_xp, 10);
    assert_eq!(job.accumulated_currency, 4);
}

#[test]
fn zero_interval_jobs_are_inert() {
    let mut job = Job::default();
    assert_eq!(offline::apply_job_progress(&mut job, 10_000), 0);
    assert_eq!(job, Job::default());
}

#[test]
fn clock_moving_backwards_awards_nothing() {
    let mut jobs = vec![Job {
        interval_ms: 1_000,
        xp_per_tick: 5,
        ..Job::default()
    }];
    assert_eq!(offline::catch_up_jobs(&mut jobs, 5_000, 3_000), 0);
}

/* ──────────────────────────────────────────────────────────────────────────
Action loop
────────────────────────────────────────────────────────────────────────── */

#[test]
fn poll_grants_each_completed_cycle_exactly_once() {
    let mut player = PlayerCharacter::default();
    let mut runner = ActionRunner::start(chopping(), 0);

    assert_eq!(runner.poll(&mut player, 2_999).cycles, 0);
    let report = runner.poll(&mut player, 3_000);
    assert_eq!(report.cycles, 1);
    assert_eq!(report.xp, 8);
    assert_eq!(player.item_count("oak_log"), 1);

    // Nothing new until the next cycle boundary.
    assert_eq!(runner.poll(&mut player, 5_999).cycles, 0);
    assert_eq!(runner.poll(&mut player, 9_100).cycles, 2);
    assert_eq!(player.item_count("oak_log"), 3);
    assert_eq!(player.skill_xp(SkillId::Woodcutting), 24);
}

#[test]
fn progress_reports_percent_of_the_cycle() {
    let runner = ActionRunner::start(chopping(), 0);
    assert_eq!(runner.progress(1_500).percent, 50);
    assert_eq!(runner.progress(1_500).remaining_ms, 1_500);
    assert_eq!(runner.progress(99_999).percent, 100);
}

#[test]
fn resume_carries_partial_progress_into_the_live_cycle() {
    let mut player = PlayerCharacter::default();
    let (runner, report) = ActionRunner::resume(chopping(), &mut player, 0, 7_500);
    assert_eq!(report.cycles, 2);
    assert_eq!(player.item_count("oak_log"), 2);
    assert_eq!(runner.started_at(), 6_000);
    assert_eq!(runner.progress(7_500).percent, 50);
}

#[test]
fn resume_caps_the_absence() {
    let mut player = PlayerCharacter::default();
    let ten_hours = 10 * 60 * 60 * 1_000;
    let (_, report) = ActionRunner::resume(chopping(), &mut player, 0, ten_hours);
    assert_eq!(report.cycles, MAX_OFFLINE_MS / 3_000);
    assert_eq!(player.item_count("oak_log"), (MAX_OFFLINE_MS / 3_000) as i64);
}

#[test]
fn currency_outputs_land_in_the_ledger() {
    let mut player = PlayerCharacter::default();
    let busking = ActionDef {
        id: "busk".to_string(),
        name: "Busk".to_string(),
        skill: SkillId::Community,
        duration_ms: 1_000,
        exp: 6,
        outputs: [("currency:silver".to_string(), 2)].into_iter().collect(),
        req_level: 1,
    };
    let mut runner = ActionRunner::start(busking, 0);
    runner.poll(&mut player, 5_000);
    assert_eq!(player.currency("silver"), 10);
    assert!(player.bag.is_empty());
}

/* ──────────────────────────────────────────────────────────────────────────
Facade: restore + catch up
────────────────────────────────────────────────────────────────────────── */

#[test]
fn restored_session_pays_out_jobs_and_the_running_action() {
    let content = GameContent::load(PACK).expect("pack parses");
    let mut game = Game::new(content, 1);
    game.start_action("chop_oak", 0).expect("chop_oak unlocked at level 1");
    game.add_job(Job {
        interval_ms: 60_000,
        xp_per_tick: 1,
        currency_per_tick: 1,
        ..Job::default()
    });
    let save = game.snapshot(0);

    let content = GameContent::load(PACK).expect("pack parses");
    let mut restored = Game::from_save(content, save, 1);
    let report = restored.catch_up(3_600_000);

    assert_eq!(report.elapsed_ms, 3_600_000);
    assert_eq!(report.job_ticks, 60);
    let action = report.action.expect("running action resumed");
    assert_eq!(action.cycles, 1_200);
    assert_eq!(restored.player().item_count("oak_log"), 1_200);
    assert!(restored.running_action().is_some());
    assert_eq!(restored.jobs()[0].accumulated_xp, 60);
}

#[test]
fn action_level_gates_are_enforced() {
    let content = GameContent::load(PACK).expect("pack parses");
    let mut game = Game::new(content, 2);
    let err = game.start_action("deep_vein", 0).unwrap_err();
    assert_eq!(
        err,
        akthos_idle::game::ActionError::LevelTooLow {
            skill: SkillId::Mining,
            required: 15
        }
    );
}
