//! numtap - tap-to-count numeral game
//!
//! Terminal host for the game core. Press Enter (or type `t`) to tap, `q` to
//! quit.

mod config;
mod logging_setup;
mod view;

use anyhow::Result;
use crossbeam_channel::{select, tick, unbounded, Receiver};
use numtap_core::{AudioSettings, GameEvent, NullScheduler, RoundMachine, ToneScheduler};
use std::io::{self, BufRead};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ConfigSource;

const FRAME: Duration = Duration::from_millis(16);

/// Player input forwarded from the reader thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Tap,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim() {
        "" | "t" | "T" => Some(Input::Tap),
        "q" | "Q" => Some(Input::Quit),
        _ => None,
    }
}

fn spawn_input_reader() -> io::Result<Receiver<Input>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_input(&line) {
                    Some(input) => {
                        if tx.send(input).is_err() || input == Input::Quit {
                            return;
                        }
                    }
                    None => eprintln!("Press Enter to tap, q to quit"),
                }
            }
            let _ = tx.send(Input::Quit);
        })?;
    Ok(rx)
}

#[cfg(feature = "audio")]
fn open_scheduler(settings: &AudioSettings) -> Box<dyn ToneScheduler> {
    if !settings.enabled {
        info!("Audio disabled in config");
        return Box::new(NullScheduler);
    }
    match numtap_core::CpalScheduler::new(settings.master_volume) {
        Ok(scheduler) => {
            info!("Playing cues on '{}'", scheduler.device_name());
            Box::new(scheduler)
        }
        Err(e) => {
            warn!("Audio unavailable, continuing silently: {}", e);
            Box::new(NullScheduler)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_scheduler(settings: &AudioSettings) -> Box<dyn ToneScheduler> {
    if settings.enabled {
        info!("Built without the audio feature, continuing silently");
    }
    Box::new(NullScheduler)
}

fn log_events(events: Vec<GameEvent>) {
    for event in events {
        debug!("{:?}", event);
    }
}

fn main() -> Result<()> {
    let (config, source) = config::load_from(&config::config_path());
    let _log_guard = logging_setup::init(&config.log)?;

    match &source {
        ConfigSource::Defaults => info!("No config file, using defaults"),
        ConfigSource::File(path) => info!("Loaded config from {:?}", path),
        ConfigSource::Fallback { path, reason } => {
            warn!("Ignoring config {:?}: {}", path, reason)
        }
    }

    info!("=== numtap session started ===");

    let scheduler = open_scheduler(&config.audio);
    let mut game = RoundMachine::new(config.timing, scheduler, rand::rng());
    let input = spawn_input_reader()?;
    let frames = tick(FRAME);

    let mut last_frame = Instant::now();
    let mut shown = game.snapshot();
    print!("{}", view::render(&shown));

    loop {
        let received = select! {
            recv(input) -> msg => Some(msg.unwrap_or(Input::Quit)),
            recv(frames) -> _ => None,
        };

        // Catch the clock up before acting on input
        let now = Instant::now();
        game.advance(now - last_frame);
        last_frame = now;

        match received {
            Some(Input::Tap) => game.tap(),
            Some(Input::Quit) => break,
            None => {}
        }

        log_events(game.drain_events());

        let snapshot = game.snapshot();
        if snapshot != shown {
            print!("\n{}", view::render(&snapshot));
            shown = snapshot;
        }
    }

    game.shutdown();
    info!("=== numtap session ended ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(""), Some(Input::Tap));
        assert_eq!(parse_input("  t "), Some(Input::Tap));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("hello"), None);
    }
}
