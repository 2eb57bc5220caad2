//! The `exoplanets` binary: loads the catalog and runs the explorer session
//! headlessly for a number of frames.

use std::ops::ControlFlow;
use std::process::ExitCode;

use clap::Parser;
use exo_app::{Autopilot, FrameLoop, InputRouter, PlatformDirs, Session, SessionSettings};
use exo_catalog::DatasetSource;
use exo_config::{CliArgs, Config};
use tracing::{debug, error, info};

/// Frames between progress lines in the log.
const REPORT_EVERY: u64 = 60;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(config_dir) => PlatformDirs::with_config_dir(config_dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    exo_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let source = DatasetSource::parse(&config.dataset.source);
    let mut session = match Session::load(SessionSettings::from_config(&config), &source) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "could not load the exoplanet catalog, no scene created");
            return ExitCode::FAILURE;
        }
    };

    let mut input = InputRouter::from_config(&config.input);
    let mut autopilot = args.autopilot.then(|| Autopilot::new(session.mode()));
    let target_fps = if autopilot.is_some() {
        0
    } else {
        config.window.target_fps
    };
    let mut frame_loop = FrameLoop::new(target_fps);

    info!(status = %session.status(), frames = args.frames, "running");
    let ran = frame_loop.run(args.frames, |frame| {
        if let Some(pilot) = autopilot.as_mut() {
            pilot.drive(&session, &mut input);
        }
        for event in input.drain() {
            session.handle(event);
        }
        let summary = session.tick();
        if frame % REPORT_EVERY == 0 {
            debug!(
                frame = summary.frame,
                phase = %summary.phase,
                bodies = summary.bodies,
                camera = ?summary.camera_position,
                "frame"
            );
        }

        match &autopilot {
            Some(pilot) if pilot.is_done() => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });

    let summary = session.summary();
    info!(
        frames = ran,
        phase = %summary.phase,
        bodies = summary.bodies,
        live_visuals = summary.live_visuals,
        "session finished"
    );
    info!("{}", session.panel_text());
    ExitCode::SUCCESS
}
