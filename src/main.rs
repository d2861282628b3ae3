//! Breakout headless runner
//!
//! Loads a level, drives the simulation with a ball-tracking autopilot at a
//! fixed timestep and reports what happened.
//!
//! Usage: `breakout [level-path] [--seed N] [--ticks N] [--tuning path] [--json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use breakout::Tuning;
use breakout::audio::{AudioSink, LogSink, SoundEffect, dispatch_sounds};
use breakout::consts::*;
use breakout::renderer::draw_calls;
use breakout::sim::{GamePhase, GameState, TickInput, load_level_or_empty, parse_level, tick};

#[derive(Parser, Debug)]
#[command(name = "breakout", about = "Run a Breakout level headless with an autopilot paddle")]
struct Cli {
    /// Level file (tile grid); the built-in level is used when omitted
    level: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Stop after this many simulation ticks
    #[arg(long = "ticks", default_value_t = 120 * 120)]
    max_ticks: u64,

    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// End-of-run report
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    phase: GamePhase,
    destroyed: u32,
    remaining: usize,
    rounds_lost: u32,
    sounds_played: u64,
    last_frame_draw_calls: usize,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    audio: LogSink,
    rounds_lost: u32,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            audio: LogSink::default(),
            rounds_lost: 0,
        }
    }

    /// Steer the paddle under the ball and launch whenever it is stuck
    fn autopilot(&mut self) {
        let ball_x = self.state.ball.center().x;
        let paddle_x = self.state.paddle.center_x();
        let dead_zone = self.state.paddle.size.x * 0.1;

        self.input.move_left = ball_x < paddle_x - dead_zone;
        self.input.move_right = ball_x > paddle_x + dead_zone;
        self.input.launch = self.state.ball.stuck;
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.autopilot();
            tick(&mut self.state, &self.input, SIM_DT);
            dispatch_sounds(&self.state.events, &mut self.audio);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.launch = false;

            if self.state.phase == GamePhase::Lost {
                self.rounds_lost += 1;
                self.state.reset_round();
            }
        }
    }
}

fn run(cli: &Cli) -> Result<Summary> {
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning {}", path.display()))?,
        None => Tuning::default(),
    };

    let obstacles = match &cli.level {
        Some(path) => load_level_or_empty(path, tuning.field_width),
        None => {
            log::info!("No level given, using built-in level");
            parse_level(BUILTIN_LEVEL, tuning.field_width).context("built-in level")?
        }
    };

    let mut game = Game::new(GameState::new(cli.seed, tuning, obstacles));
    game.audio.play(SoundEffect::Music, true);

    // Drive at 60 FPS; the accumulator splits each frame into sim ticks
    let frame_dt = 1.0 / 60.0;
    while game.state.time_ticks < cli.max_ticks && game.state.phase == GamePhase::Active {
        game.update(frame_dt);
    }

    Ok(Summary {
        seed: cli.seed,
        ticks: game.state.time_ticks,
        phase: game.state.phase,
        destroyed: game.state.destroyed_count,
        remaining: game.state.remaining_breakable(),
        rounds_lost: game.rounds_lost,
        sounds_played: game.audio.played,
        last_frame_draw_calls: draw_calls(&game.state).len(),
    })
}

const BUILTIN_LEVEL: &str = "\
5 5 5 5 5 5 5 5 5 5 5 5 5 5 5
5 5 5 5 5 5 5 5 5 5 5 5 5 5 5
4 4 4 4 4 0 0 0 0 0 4 4 4 4 4
4 1 4 1 4 0 0 1 0 0 4 1 4 1 4
3 3 3 3 3 0 0 0 0 0 3 3 3 3 3
3 3 1 3 3 3 3 3 3 3 3 3 1 3 3
2 2 2 2 2 2 2 2 2 2 2 2 2 2 2
2 2 2 2 2 2 2 2 2 2 2 2 2 2 2
";

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let cli = Cli::parse();
    let summary = run(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{:?} after {} ticks: destroyed {}, {} left, {} balls lost",
            summary.phase, summary.ticks, summary.destroyed, summary.remaining, summary.rounds_lost
        );
    }
    Ok(())
}
