//! Catch the Apple entry point
//!
//! Parses flags, sets up logging, audio and the terminal, then runs the
//! frame loop until quit (or, in the classic game, until the third miss).

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use catch_the_apple::audio::AudioManager;
use catch_the_apple::consts::MAX_MISSES;
use catch_the_apple::platform::{FrameClock, TerminalInput};
use catch_the_apple::renderer::{TerminalPresenter, draw_frame};
use catch_the_apple::sim::{GameEvent, GameMode, GameState, tick};
use catch_the_apple::{Settings, Theme, Variant};

/// Catch the falling apple before it hits the ground
#[derive(Debug, Parser)]
#[command(name = "catch-the-apple", version, about)]
struct Cli {
    /// Settings file (JSON); missing means defaults
    #[arg(long, default_value = Settings::FILE_NAME)]
    settings: PathBuf,

    /// Game variant: classic or arcade
    #[arg(long, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// Art style: apple or block
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Fixed seed for reproducible drops
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate cap
    #[arg(long)]
    fps: Option<u32>,

    /// Disable all sound
    #[arg(long)]
    mute: bool,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the settings file
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(fps) = self.fps {
            settings.target_fps = fps;
        }
        if self.mute {
            settings.muted = true;
        }
        settings.sanitized()
    }
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s).ok_or_else(|| format!("unknown variant '{s}' (classic, arcade)"))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{s}' (apple, block)"))
}

/// Stderr shares the screen with the game, so it stays quiet unless RUST_LOG asks
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

/// The frame loop: clock, input, tick, side effects, draw
fn run(
    settings: &Settings,
    seed: u64,
    terminal: &mut TerminalPresenter,
    audio: &mut AudioManager,
) -> Result<GameState> {
    let mut state = GameState::new(seed, settings.variant);
    let mut clock = FrameClock::new(settings.target_fps);
    let mut input = TerminalInput::new(terminal.reports_key_release());

    if settings.variant == Variant::Arcade {
        audio.start_music();
    }

    loop {
        let dt = clock.tick();
        let frame_input = input.poll()?;

        for event in tick(&mut state, &frame_input, dt.as_secs_f32()) {
            match event {
                GameEvent::Quit => {
                    log::info!("Quit after {} frames", state.time_ticks);
                    return Ok(state);
                }
                GameEvent::ModeChanged(mode) => log::info!("Mode -> {}", mode.name()),
                GameEvent::RoundOver { score } => {
                    log::info!("Round over: score {score}, lives {}", state.round.lives)
                }
                other => audio.handle(&other),
            }
        }

        // The classic game has no game-over screen
        if state.variant == Variant::Classic && state.mode == GameMode::GameOver {
            return Ok(state);
        }

        draw_frame(&state, settings.theme, terminal.canvas_mut());
        terminal.present()?;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let settings = cli.apply(Settings::load(&cli.settings)?);
    let seed = settings.seed.unwrap_or_else(seed_from_clock);
    log::info!(
        "Catch the Apple starting ({} variant, {} theme, seed {seed}, {} fps)",
        settings.variant.as_str(),
        settings.theme.as_str(),
        settings.target_fps
    );

    let mut audio = AudioManager::new(&settings)?;
    let mut terminal = TerminalPresenter::begin()?;
    let outcome = run(&settings, seed, &mut terminal, &mut audio);
    audio.stop_music();
    terminal.end()?;
    let state = outcome?;

    if state.variant == Variant::Classic && state.mode == GameMode::GameOver {
        println!("Game Over! You missed {MAX_MISSES} times.");
        println!("Final Score: {}", state.round.score);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let cli = Cli::try_parse_from([
            "catch-the-apple",
            "--variant",
            "classic",
            "--theme",
            "box",
            "--seed",
            "7",
            "--fps",
            "500",
            "--mute",
        ])
        .unwrap();
        let settings = cli.apply(Settings::default());
        assert_eq!(settings.variant, Variant::Classic);
        assert_eq!(settings.theme, Theme::Block);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.target_fps, 240);
        assert!(settings.muted);
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let cli = Cli::try_parse_from(["catch-the-apple"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from(Settings::FILE_NAME));
        let file = Settings {
            seed: Some(3),
            theme: Theme::Block,
            ..Settings::default()
        };
        assert_eq!(cli.apply(file.clone()), file);
    }

    #[test]
    fn test_bad_variant_rejected() {
        assert!(Cli::try_parse_from(["catch-the-apple", "--variant", "deluxe"]).is_err());
    }
}
