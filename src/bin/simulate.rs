//! Damage simulator CLI.
//!
//! Run Monte Carlo trials of an attack sequence and print P(damage >= X).
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS] <DAMAGES>...
//!
//! Examples:
//!   cargo run --bin simulate -- 3 3 2                      # 3 attacks vs 50 cards / 8 climax
//!   cargo run --bin simulate -- 3 3 3 --deck-cards 20 --waiting-room-cards 25 --waiting-room-climax-cards 6
//!   cargo run --bin simulate -- 3 3 3 --auto-tune --threshold 6
//!   cargo run --bin simulate -- 2 2 --top-stack 0001 --fourth-cancel-bonus

use anyhow::{bail, Context, Result};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;
use std::path::PathBuf;
use ws_sim::build_info;
use ws_sim::damage::attacks;
use ws_sim::{run_simulation, DeckSetup, MainPhaseStep, SimConfig, TuneConfig};

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Climax-cancel damage Monte Carlo simulator")]
struct Args {
    /// Damage values for each attack (e.g. 2 3 3)
    #[arg(required = true, num_args = 1..)]
    damages: Vec<u32>,

    /// Current number of cards in the deck
    #[arg(long, visible_alias = "total-cards", default_value_t = 50)]
    deck_cards: u32,

    /// Number of climax cards currently in the deck
    #[arg(long, visible_alias = "climax-cards", default_value_t = 8)]
    deck_climax_cards: u32,

    /// Cards already in the waiting room, in addition to the deck
    #[arg(long, default_value_t = 0)]
    waiting_room_cards: u32,

    /// Climax cards already in the waiting room
    #[arg(long, default_value_t = 0)]
    waiting_room_climax_cards: u32,

    /// Attacker deck size (enables soul triggers)
    #[arg(long)]
    attacking_deck_size: Option<u32>,

    /// Soul trigger cards in the attacker deck
    #[arg(long, default_value_t = 0)]
    soul_triggers: u32,

    /// Number of Monte Carlo trials (starting count when auto-tuning)
    #[arg(long, default_value_t = 5000)]
    trials: u32,

    /// Tune the trial count using --threshold
    #[arg(long)]
    auto_tune: bool,

    /// Threshold whose probability is estimated while auto-tuning
    #[arg(long)]
    threshold: Option<u32>,

    /// Absolute error tolerance for auto-tuning
    #[arg(long, default_value_t = 0.01)]
    target_error: f64,

    /// Upper bound on the tuned trial count
    #[arg(long, default_value_t = 50_000)]
    max_trials: u32,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Known top of the deck before the main phase, top first (1 = climax), e.g. 0001
    #[arg(long, value_parser = parse_top_stack)]
    top_stack: Option<TopStack>,

    /// Main phase: 4 cancellable damage, 4 more if the 4th card cancels
    #[arg(long)]
    fourth_cancel_bonus: bool,

    /// Main phase: reveal 9 cards, 1 damage per climax
    #[arg(long)]
    reveal_nine: bool,

    /// Save the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Climax flags, top card first.
#[derive(Debug, Clone)]
struct TopStack(Vec<bool>);

fn parse_top_stack(raw: &str) -> Result<TopStack, String> {
    raw.chars()
        .map(|c| match c {
            '1' | 'x' | 'X' => Ok(true),
            '0' | '.' => Ok(false),
            other => Err(format!("unexpected '{other}', use 1 for climax and 0 otherwise")),
        })
        .collect::<Result<Vec<bool>, String>>()
        .map(TopStack)
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, _) => LevelFilter::Debug,
        }
    }

    fn into_config(self) -> Result<SimConfig> {
        let mut setup = DeckSetup::new(self.deck_cards, self.deck_climax_cards);
        if self.waiting_room_cards > 0 || self.waiting_room_climax_cards > 0 {
            setup = setup.with_waiting_room(self.waiting_room_cards, self.waiting_room_climax_cards);
        }
        if let Some(size) = self.attacking_deck_size {
            setup = setup.with_attacking_deck(size, self.soul_triggers);
        }
        let deck = setup.build().context("invalid deck configuration")?;

        let mut steps = Vec::new();
        if let Some(TopStack(top_stack)) = self.top_stack {
            steps.push(MainPhaseStep::SeedTopStack(top_stack));
        }
        if self.fourth_cancel_bonus {
            steps.push(MainPhaseStep::FourthCancelBonus);
        }
        if self.reveal_nine {
            steps.push(MainPhaseStep::RevealNineClock);
        }

        let auto_tune = match (self.auto_tune, self.threshold) {
            (false, _) => None,
            (true, None) => bail!("--auto-tune requires --threshold to be specified"),
            (true, Some(threshold)) => Some(TuneConfig {
                target_error: self.target_error,
                min_trials: self.trials,
                max_trials: self.max_trials,
                seed: Some(self.seed),
                ..TuneConfig::new(threshold)
            }),
        };

        Ok(SimConfig {
            trials: self.trials,
            seed: Some(self.seed),
            main_phase_steps: steps,
            auto_tune,
            ..SimConfig::new(attacks(&self.damages), deck)
        })
    }
}

fn main() -> Result<()> {
    let matches = Args::command()
        .version(build_info::version_line())
        .get_matches();
    let args = Args::from_arg_matches(&matches)?;

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let json_path = args.json.clone();
    let config = args.into_config()?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CLIMAX CANCEL DAMAGE SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    let damages: Vec<String> = config
        .damage_sequence
        .iter()
        .map(|e| e.base_damage.to_string())
        .collect();
    println!("  Attacks:        {}", damages.join(" "));
    let deck = config.deck.deck();
    let waiting_room = config.deck.waiting_room();
    println!("  Deck:           {} cards, {} climax", deck.cards, deck.climax);
    println!(
        "  Waiting Room:   {} cards, {} climax",
        waiting_room.cards, waiting_room.climax
    );
    if let Some(attacking) = config.deck.attacking() {
        println!(
            "  Attacker Deck:  {} cards, {} soul triggers",
            attacking.size(),
            attacking.soul_triggers()
        );
    }
    for step in &config.main_phase_steps {
        println!("  Main Phase:     {:?}", step);
    }
    if let Some(tune) = &config.auto_tune {
        println!(
            "  Auto-tune:      P(>= {}) within {} ({}..{} trials)",
            tune.threshold, tune.target_error, tune.min_trials, tune.max_trials
        );
    } else {
        println!("  Trials:         {}", config.trials);
    }
    println!();

    let report = run_simulation(&config).context("simulation failed")?;
    println!("{}", report.to_text());

    if let Some(path) = json_path {
        std::fs::write(&path, report.to_json())
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(())
}
