//! Dodge & Shoot headless runner
//!
//! Plays the simulation on autopilot at a fixed step, feeding cues to the
//! audio sink and boss-defeat scores to the ranking. Useful for soak tests
//! and for inspecting a run as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use dodge_shoot::HighScores;
use dodge_shoot::Settings;
use dodge_shoot::audio::{AssetCatalog, AudioManager, AudioSink};
use dodge_shoot::consts::FRAME_RATE;
use dodge_shoot::settings::Difficulty;
use dodge_shoot::sim::{FrameEvents, GameState, TickInput};

#[derive(Parser, Debug)]
#[command(name = "dodge-shoot")]
#[command(about = "Run Dodge & Shoot headless on autopilot")]
struct Args {
    /// Frames to simulate before stopping
    #[arg(long, default_value_t = 60 * FRAME_RATE as u64)]
    ticks: u64,
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final state as JSON
    #[arg(long)]
    snapshot: bool,
    /// Override the saved difficulty
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,
    #[arg(long = "settings", default_value = "settings.json")]
    settings_path: PathBuf,
    #[arg(long = "scores", default_value = "highscores.json")]
    scores_path: PathBuf,
    #[arg(long = "assets", default_value = "assets")]
    assets_dir: PathBuf,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Route one frame's events to the collaborators. A ranked score is saved
/// to `scores_path` on the spot.
fn dispatch(
    events: &FrameEvents,
    audio: &mut impl AudioSink,
    scores: &mut HighScores,
    scores_path: &Path,
) {
    for &cue in &events.cues {
        audio.play(cue);
    }
    if let Some(score) = events.record_score {
        match scores.record(score) {
            Some(rank) => {
                log::info!("New high score #{rank}: {score}");
                if let Err(e) = scores.save(scores_path) {
                    log::error!("Failed to save high scores: {e}");
                }
            }
            None => log::debug!("Score {score} did not rank"),
        }
    }
    if let Some(wave) = events.wave_advanced {
        log::info!("Wave {wave} begins");
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let mut settings = Settings::load(&args.settings_path);
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    let mut scores = HighScores::load(&args.scores_path);
    let mut audio = AudioManager::from_settings(AssetCatalog::scan(&args.assets_dir), &settings);

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut state: GameState = settings.new_game(seed);
    log::info!(
        "Dodge & Shoot starting: seed {seed}, {} difficulty, {} ticks",
        settings.difficulty.as_str(),
        args.ticks
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    for _ in 0..args.ticks {
        let events = state.update(&input);
        dispatch(&events, &mut audio, &mut scores, &args.scores_path);
        if events.game_over {
            break;
        }
    }

    log::info!(
        "Run finished after {} ticks: wave {}, score {}, {} kills, {} lives left",
        state.time_ticks,
        state.wave.wave,
        state.player.score,
        state.kills,
        state.player.lives
    );

    if args.snapshot {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
