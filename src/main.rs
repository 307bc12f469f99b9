//! TreeBot - Entry Point
//!
//! Runs the decision loop against a sandbox world and provides a small REPL
//! for stepping ticks and issuing `/treebot` commands.

use clap::Parser;
use glam::DVec3;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use treebot::command::{CommandExecutor, Feedback};
use treebot::core::error::{BotError, Result};
use treebot::sandbox::scenario::Scenario;
use treebot::sandbox::{ActionRecord, SandboxWorld};
use treebot::{BotConfig, TickOutcome, TreeBot};

/// Tick-driven combat, tree farming and fishing bot
#[derive(Parser, Debug)]
#[command(name = "treebot")]
#[command(about = "Run the TreeBot decision loop in a sandbox world")]
struct Args {
    /// Random seed for the sandbox world
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML file overriding bot tuning values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting world
    #[arg(long, value_enum, default_value_t = Scenario::Forest)]
    scenario: Scenario,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treebot=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::default(),
    };
    tracing::info!("TreeBot starting ({:?}, seed {})", args.scenario, args.seed);

    let mut world = args.scenario.build(args.seed);
    let mut bot = TreeBot::new(config);
    let mut last_actions: Vec<ActionRecord> = Vec::new();

    println!("\n=== TREEBOT ===");
    println!("Commands:");
    println!("  tick / t            - Advance one tick");
    println!("  run <n>             - Advance n ticks");
    println!("  /treebot [mode <idle|tree|fish> | status]");
    println!("  spawn <x> <z>       - Spawn a hostile at (x, 0, z)");
    println!("  actions / a         - Show actuator calls from the last tick");
    println!("  quit / q            - Exit");
    println!();

    loop {
        print!("[tick {}] > ", bot.current_tick());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let outcome = step(&mut bot, &mut world, &mut last_actions);
            println!("{:?}", outcome);
            continue;
        }

        if let Some(count) = input.strip_prefix("run ") {
            match count.trim().parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        step(&mut bot, &mut world, &mut last_actions);
                    }
                    print_summary(&bot, &world);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        if input == "actions" || input == "a" {
            for action in &last_actions {
                if !matches!(action, ActionRecord::Key { pressed: false, .. }) {
                    println!("  {:?}", action);
                }
            }
            continue;
        }

        if let Some(coords) = input.strip_prefix("spawn ") {
            let parsed: Vec<f64> = coords
                .split_whitespace()
                .filter_map(|c| c.parse().ok())
                .collect();
            match parsed.as_slice() {
                [x, z] => {
                    let id = world.spawn_hostile(DVec3::new(*x, 0.0, *z));
                    println!("Spawned hostile {}", id);
                }
                _ => println!("Usage: spawn <x> <z>"),
            }
            continue;
        }

        match CommandExecutor::run(&mut bot, input).map_err(BotError::from) {
            Ok(outcome) => {
                for line in &outcome.feedback {
                    match line {
                        Feedback::Info(text) => println!("{}", text),
                        Feedback::Error(text) => println!("error: {}", text),
                    }
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    print_summary(&bot, &world);
    Ok(())
}

/// One client tick: the bot decides, then the sandbox simulates
fn step(bot: &mut TreeBot, world: &mut SandboxWorld, last_actions: &mut Vec<ActionRecord>) -> TickOutcome {
    world.take_actions();
    let outcome = bot.tick(world);
    *last_actions = world.actions().to_vec();
    world.step();
    outcome
}

fn print_summary(bot: &TreeBot, world: &SandboxWorld) {
    let stats = world.stats();
    let pos = world.player_state().position;
    println!(
        "Tick {} | selected {} runtime {} | pos ({:.1}, {:.1}, {:.1}) | logs {} kills {} fish {}",
        bot.current_tick(),
        bot.selected_mode(),
        bot.runtime_mode(),
        pos.x,
        pos.y,
        pos.z,
        stats.blocks_broken,
        stats.mobs_killed,
        stats.fish_caught
    );
}
