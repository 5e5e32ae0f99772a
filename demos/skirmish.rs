// demos/skirmish.rs
// Run with:
//   cargo run --example skirmish

use akthos_idle::Game;
use akthos_idle::data::content::GameContent;
use akthos_idle::engine::combat::{CombatEvent, Outcome};
use akthos_idle::services::vendor;

const PACK: &str = include_str!("../assets/game.json");

fn main() {
    env_logger::init();

    let content = GameContent::load(PACK).expect("content pack should parse");
    let mut game = Game::new(content, 0xA57);

    // Gear up: buy a sword off the shop listing and equip it.
    game.add_currency("silver", 60);
    let mut listing = game
        .content()
        .shop_entry_for("bronze_sword")
        .expect("sword is listed")
        .clone();
    vendor::buy(game.player_mut(), &mut listing, 1).expect("affordable");
    game.equip("bronze_sword").expect("equips");

    game.start_encounter("cave_rat", 0).expect("monster exists");
    let mut now = 0u64;
    let outcome = 'fight: loop {
        now += 100;
        for event in game.combat_tick(now) {
            if let CombatEvent::Ended(outcome) = event {
                break 'fight outcome;
            }
        }
    };

    // The log is newest-first; print it in reading order.
    let lines: Vec<&str> = game.encounter().expect("encounter kept").log().collect();
    for line in lines.iter().rev() {
        println!("  {line}");
    }
    println!();

    match outcome {
        Outcome::Victory => {
            println!("Victory in {:.1} s. Loot:", now as f64 / 1000.0);
            for stack in game.pending_loot() {
                println!("  +{}x {}", stack.qty, stack.name);
            }
            game.collect_pending();
        }
        Outcome::Defeat => println!("Defeated after {:.1} s.", now as f64 / 1000.0),
    }

    println!("silver: {}", game.currency("silver"));
    for (id, name, qty) in game.bag_rows() {
        println!("  {qty}x {name} ({id})");
    }
}
