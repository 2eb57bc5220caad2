use std::path::PathBuf;

use exo_catalog::{DatasetSource, ExoplanetRecord, StarId};
use exo_config::SceneMode;
use exo_scene::{BodyKind, GenerationOutcome, StatusMessage, SystemChoice};
use glam::{Vec2, Vec3};

use crate::autopilot::{Autopilot, most_central};
use crate::controls::InputRouter;
use crate::session::{NavPhase, Session, SessionEvent, SessionSettings};

fn planet(kepid: u64, name: &str, teq: f64) -> ExoplanetRecord {
    ExoplanetRecord {
        kepoi_name: Some(name.to_string()),
        koi_prad: Some(1.2),
        koi_teq: Some(teq),
        koi_period: Some(12.5),
        ..ExoplanetRecord::new(kepid)
    }
}

fn three_records() -> Vec<ExoplanetRecord> {
    vec![
        planet(1, "K00001.01", 600.0),
        planet(1, "K00001.02", -10.0),
        planet(2, "K00002.01", 50.0),
    ]
}

fn catalog(count: u64) -> Vec<ExoplanetRecord> {
    (0..count)
        .map(|i| planet(i % 9, &format!("K{i:05}.01"), i as f64 * 40.0))
        .collect()
}

fn settings(mode: SceneMode) -> SessionSettings {
    let mut settings = SessionSettings::default();
    settings.mode = mode;
    settings.seed = Some(7);
    settings.population.star_count = Some(40);
    settings.asset_dir = PathBuf::from("/nonexistent/exoplanet-assets");
    settings
}

fn tick_until(session: &mut Session, phase: NavPhase, max_frames: usize) -> usize {
    for frame in 1..=max_frames {
        if session.tick().phase == phase {
            return frame;
        }
    }
    panic!("never reached {phase}");
}

/// Click the star nearest the screen center and fly to it.
fn focus_first_star(session: &mut Session) {
    let pointer = most_central(&*session, session.stars()).expect("a star in view");
    session.handle(SessionEvent::Select { pointer });
    assert_eq!(session.summary().phase, NavPhase::Transitioning);
    tick_until(session, NavPhase::Focused, 200);
}

#[test]
fn test_two_planet_system_on_ten_and_fifteen() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), three_records());
    let sizes: Vec<usize> = session.systems().iter().map(|s| s.len()).collect();
    assert_eq!(sizes, [2, 1]);

    let outcome = session.generate(SystemChoice::Star(StarId(1)));
    assert_eq!(outcome, GenerationOutcome::Populated { bodies: 3 });

    let star = session.stars()[0];
    assert_eq!(session.scene().get(star).unwrap().position(), Vec3::ZERO);
    let mut distances: Vec<f32> = session
        .planets()
        .iter()
        .map(|&id| session.scene().world_position(id).unwrap().length())
        .collect();
    distances.sort_by(f32::total_cmp);
    assert!((distances[0] - 10.0).abs() < 1e-3);
    assert!((distances[1] - 15.0).abs() < 1e-3);
    assert_eq!(session.status(), StatusMessage::ClickPlanet);
}

#[test]
fn test_single_system_orbits_keep_radius() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), three_records());
    session.generate(SystemChoice::Star(StarId(1)));
    let first = session.planets()[0];
    let before = session.scene().get(first).unwrap().position();
    for _ in 0..100 {
        session.tick();
    }
    let after = session.scene().get(first).unwrap().position();
    assert!((before - after).length() > 1.0);
    assert!((after.length() - 10.0).abs() < 1e-3);
    assert_eq!(after.y, 0.0);
}

#[test]
fn test_clicking_planet_fills_info_panel() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), three_records());
    session.generate(SystemChoice::Star(StarId(1)));
    let target = session.planets()[1];
    let pointer = session.screen_position(target).unwrap();

    session.handle(SessionEvent::Select { pointer });
    let selected = session.selected().expect("planet selected");
    assert!(session.planets().contains(&selected));

    let info = session.info().unwrap();
    assert!(info.value("Name").unwrap().starts_with("K00001"));
    assert_eq!(info.value("Orbital period"), Some("12.5 days"));
    assert!(session.panel_text().contains("Temperature: "));
    // Single-system clicks never start navigation.
    assert_eq!(session.summary().phase, NavPhase::Overview);
}

#[test]
fn test_click_in_empty_space_changes_nothing() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), three_records());
    session.generate(SystemChoice::Star(StarId(2)));
    session.handle(SessionEvent::Select {
        pointer: Vec2::new(1.0, 1.0),
    });
    assert!(session.selected().is_none());
    assert_eq!(
        session.panel_text(),
        "Click an exoplanet to see its details"
    );
}

#[test]
fn test_regenerating_never_leaks_bodies() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), catalog(60));
    for _ in 0..30 {
        session.handle(SessionEvent::GenerateSystem);
        let summary = session.tick();
        assert_eq!(summary.bodies, 1 + session.planets().len());
        assert_eq!(summary.live_visuals, summary.bodies);
    }
}

#[test]
fn test_empty_catalog_declines_gracefully() {
    let mut session = Session::new(settings(SceneMode::MultiStar), Vec::new());
    assert_eq!(session.status(), StatusMessage::NoSystem);
    session.handle(SessionEvent::Select {
        pointer: Vec2::new(640.0, 360.0),
    });
    let summary = session.tick();
    assert_eq!(summary.bodies, 0);
    assert_eq!(summary.phase, NavPhase::Overview);
}

#[test]
fn test_star_field_focus_and_return() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    assert_eq!(session.stars().len(), 40);
    assert_eq!(session.candidates(), session.stars());
    assert!(session.planets().is_empty());

    focus_first_star(&mut session);
    let focus = session.navigation().focused().unwrap();
    assert!(session.orbit_controls().is_enabled());
    assert_eq!(session.planets().len(), 5);
    assert_eq!(session.candidates(), session.planets());
    assert_eq!(session.status(), StatusMessage::FocusedPlanets);
    assert!((session.camera().position.distance(focus.position) - 5.0).abs() < 1e-2);

    session.handle(SessionEvent::Cancel);
    assert!(!session.orbit_controls().is_enabled());
    assert_eq!(session.summary().phase, NavPhase::Transitioning);

    tick_until(&mut session, NavPhase::Overview, 200);
    assert!(!session.orbit_controls().is_enabled());
    assert!(session.planets().is_empty());
    assert_eq!(session.scene().len(), 40);
    assert_eq!(session.scene().live_visuals(), 40);
    assert!((session.camera().position - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-3);
    assert_eq!(session.status(), StatusMessage::ClickStar);
}

#[test]
fn test_focused_planet_selection_shows_info() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    focus_first_star(&mut session);

    let pointer =
        most_central(&session, session.planets().iter().copied()).expect("a planet in view");
    session.handle(SessionEvent::Select { pointer });

    let selected = session.selected().unwrap();
    assert_eq!(
        session.scene().get(selected).unwrap().kind,
        BodyKind::Planet
    );
    assert!(session.info().is_some());
    // Still focused: planet clicks never move the camera.
    assert_eq!(session.summary().phase, NavPhase::Focused);

    session.handle(SessionEvent::Cancel);
    tick_until(&mut session, NavPhase::Overview, 200);
    assert!(session.selected().is_none());
}

#[test]
fn test_clicks_during_transition_are_ignored() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    let pointer = most_central(&session, session.stars()).unwrap();
    session.handle(SessionEvent::Select { pointer });
    session.tick();
    let progress = session.summary().progress;
    let selected = session.selected();
    let panel = session.panel_text();
    assert!(selected.is_some());

    let other = session
        .stars()
        .into_iter()
        .filter(|&star| Some(star) != selected)
        .find_map(|star| session.screen_position(star))
        .expect("another star on screen");
    session.handle(SessionEvent::Select { pointer: other });
    session.handle(SessionEvent::Cancel);

    assert_eq!(session.summary().progress, progress);
    assert_eq!(session.summary().phase, NavPhase::Transitioning);
    assert_eq!(session.selected(), selected);
    assert_eq!(session.panel_text(), panel);
}

#[test]
fn test_rotation_only_in_overview() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    session.handle(SessionEvent::ToggleRotation);
    for _ in 0..10 {
        session.tick();
    }
    let yaw = session.summary().scene_yaw;
    assert!((yaw - 0.01).abs() < 1e-5);

    focus_first_star(&mut session);
    let focused_yaw = session.summary().scene_yaw;
    for _ in 0..10 {
        session.tick();
    }
    assert_eq!(session.summary().scene_yaw, focused_yaw);

    session.handle(SessionEvent::ToggleRotation);
    assert!(!session.rotation_enabled());
}

#[test]
fn test_parallax_only_in_overview() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    session.handle(SessionEvent::PointerMoved {
        pointer: Vec2::new(1280.0, 0.0),
    });
    let tilt = session.summary().background_tilt;
    assert!((tilt - Vec2::new(0.05, 0.05)).length() < 1e-6);

    focus_first_star(&mut session);
    session.handle(SessionEvent::PointerMoved {
        pointer: Vec2::ZERO,
    });
    assert_eq!(session.summary().background_tilt, tilt);
}

#[test]
fn test_orbit_drag_moves_focused_camera() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    focus_first_star(&mut session);
    let focus = session.navigation().focused().unwrap();
    let before = session.camera().position;

    session.handle(SessionEvent::Orbit {
        delta: Vec2::new(200.0, 0.0),
    });
    for _ in 0..60 {
        session.tick();
    }
    let after = session.camera().position;
    assert!((after - before).length() > 0.1);
    assert!((after.distance(focus.position) - before.distance(focus.position)).abs() < 1e-2);
}

#[test]
fn test_resize_updates_aspect() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), three_records());
    session.handle(SessionEvent::Resize {
        width: 1000,
        height: 500,
    });
    assert_eq!(session.viewport(), Vec2::new(1000.0, 500.0));
    assert!((session.camera().aspect_ratio - 2.0).abs() < 1e-6);
    session.handle(SessionEvent::Resize {
        width: 0,
        height: 500,
    });
    assert_eq!(session.viewport(), Vec2::new(1000.0, 500.0));
}

#[test]
fn test_generate_while_focused_resets_navigation() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    focus_first_star(&mut session);
    session.handle(SessionEvent::GenerateSystem);

    let summary = session.summary();
    assert_eq!(summary.phase, NavPhase::Overview);
    assert!(!summary.orbit_controls_enabled);
    assert_eq!(summary.bodies, 40);
    assert_eq!(summary.camera_position, Vec3::new(0.0, 0.0, 50.0));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"[{"kepid": 5, "kepoi_name": "K00005.01", "koi_prad": 0, "koi_teq": 900}]"#,
    )
    .unwrap();

    let session = Session::load(
        settings(SceneMode::SingleSystem),
        &DatasetSource::File(path),
    )
    .unwrap();
    assert_eq!(session.planets().len(), 1);
    let planet = session.scene().get(session.planets()[0]).unwrap();
    assert_eq!(planet.radius, 1.0);
}

#[test]
fn test_load_failure_creates_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "<html>not json</html>").unwrap();
    assert!(Session::load(settings(SceneMode::MultiStar), &DatasetSource::File(path)).is_err());
    assert!(
        Session::load(
            settings(SceneMode::MultiStar),
            &DatasetSource::File(dir.path().join("missing.json"))
        )
        .is_err()
    );
}

#[test]
fn test_autopilot_tour_through_star_field() {
    let mut session = Session::new(settings(SceneMode::MultiStar), catalog(25));
    let mut input = InputRouter::default();
    let mut pilot = Autopilot::new(SceneMode::MultiStar);
    let mut saw_focus = false;

    for _ in 0..1000 {
        pilot.drive(&session, &mut input);
        for event in input.drain() {
            session.handle(event);
        }
        saw_focus |= session.tick().phase == NavPhase::Focused;
        if pilot.is_done() {
            break;
        }
    }

    assert!(pilot.is_done());
    assert!(saw_focus);
    assert_eq!(session.summary().phase, NavPhase::Overview);
    assert!(session.planets().is_empty());
}

#[test]
fn test_autopilot_single_system_regenerates() {
    let mut session = Session::new(settings(SceneMode::SingleSystem), catalog(30));
    let mut input = InputRouter::default();
    let mut pilot = Autopilot::new(SceneMode::SingleSystem);

    for _ in 0..100 {
        pilot.drive(&session, &mut input);
        for event in input.drain() {
            session.handle(event);
        }
        session.tick();
        if pilot.is_done() {
            break;
        }
    }
    assert!(pilot.is_done());
    assert_eq!(session.scene().live_visuals(), session.scene().len());
}
