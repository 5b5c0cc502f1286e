/// Entry point and frame loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;
use std::time::Duration;

use simplelog::{LevelFilter, WriteLogger};

use config::GameConfig;
use domain::clock::MonotonicClock;
use domain::geometry::GeometryCatalog;
use error::GameError;
use sim::resolver::{InputEvent, KeyInput};
use sim::session::Session;
use sim::transition::{Outcome, RoomTransitionController};
use ui::input::InputState;
use ui::renderer::{Renderer, View};

const LOG_FILE: &str = "debug.log";

fn main() {
    setup_logging();
    let config = GameConfig::load();
    log::info!("Starting with {:?}", config);

    let catalog = GeometryCatalog::new(config.layout.shared_door);
    let controller = RoomTransitionController::new(config.timing.hologram_delay);
    let mut session = Session::new(catalog, controller, MonotonicClock::new());

    let mut renderer = Renderer::new(config.timing.crawl_step);
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut session, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Game error: {e}");
    }

    log::info!("Session over: {:?}", session.outcome());
    println!();
    println!("Thanks for playing Pixel Escape Room: The Quantum Paradox!");
}

/// `--debug` writes a debug-level log to `debug.log`; the terminal itself is in raw mode.
fn setup_logging() {
    if !std::env::args().any(|arg| arg == "--debug") {
        return;
    }
    let file = match File::create(LOG_FILE) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not create {LOG_FILE}: {e}");
            return;
        }
    };
    let cfg = simplelog::ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, cfg, file) {
        eprintln!("Warning: logger already set: {e}");
    }
}

fn game_loop(
    session: &mut Session<MonotonicClock>,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), GameError> {
    let mut input = InputState::new();
    let mut ended_at: Option<Duration> = None;

    loop {
        let now = session.begin_frame();
        let room = session.state().current_room();
        let inputs = input
            .drain_events(&renderer.layout(), session.catalog().layout(room))
            .to_vec();

        for ev in &inputs {
            for event in session.handle(*ev) {
                log::info!("{:?}", event);
            }
        }

        match session.update() {
            None => {
                renderer.render(View::Room {
                    state: session.state(),
                    catalog: session.catalog(),
                    now,
                })?;
            }
            Some(Outcome::Quit) => break,
            Some(outcome) => {
                let since = *ended_at.get_or_insert_with(|| {
                    log::info!("Reached ending: {:?}", outcome);
                    now
                });
                let elapsed = now.saturating_sub(since);

                // the session is frozen; only quit keys still matter
                if inputs.iter().any(is_quit) || ending_finished(renderer, outcome, elapsed, config) {
                    break;
                }
                renderer.render(View::Ending { outcome, elapsed })?;
            }
        }

        std::thread::sleep(config.timing.frame);
    }

    Ok(())
}

fn is_quit(ev: &InputEvent) -> bool {
    matches!(ev, InputEvent::Quit | InputEvent::Key(KeyInput::Cancel))
}

fn ending_finished(renderer: &Renderer, outcome: Outcome, elapsed: Duration, config: &GameConfig) -> bool {
    match outcome {
        Outcome::NarrativeEnding => renderer.crawl_finished(elapsed),
        _ => elapsed >= config.timing.ending_hold,
    }
}
