//! Headless walk through the panorama carousel: the host page's behaviour
//! with scripted pointer input instead of a browser.

mod host;
mod log_scene;
mod session;

use glam::Vec2;
use host::DemoHost;
use log_scene::LogScene;
use pano_core::{DeltaMode, Permissions, SurfaceRect, ViewerConfig, WheelInput};
use session::Session;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or_else(rand::random);
    log::info!("[demo] seed {}", seed);

    let surface = SurfaceRect::new(0.0, 0.0, 1280.0, 720.0);
    let mut session = Session::start(
        LogScene::default(),
        ViewerConfig::default(),
        DemoHost::new(seed),
        surface,
    )?;

    // Drop a few POIs around the horizon.
    for lng in [0.0, 60.0, 120.0] {
        session.look_at(0.0, lng)?;
        session.double_click()?;
    }
    report(&session);

    // Select the one in view, then pan away and back.
    session.click()?;
    report(&session);
    session.drag(Vec2::new(-300.0, 40.0))?;
    session.wheel(WheelInput::Standard {
        delta_y: -3.0,
        mode: DeltaMode::Line,
    })?;
    session.move_pointer(Vec2::new(640.0, 360.0))?;
    session.look_at(0.0, 120.0)?;

    // Deselect, then remove it.
    session.click()?;
    session.double_click()?;
    report(&session);

    // Round trip through the carousel; the remaining POIs come back.
    session.next_image()?;
    report(&session);
    session.previous_image()?;
    report(&session);

    // A read-only host still selects but no longer creates.
    session.set_permissions(Permissions::READ_ONLY);
    session.look_at(0.0, 200.0)?;
    session.double_click()?;
    report(&session);

    log::info!("[demo] {} events delivered", session.events().len());
    Ok(())
}

fn report(session: &Session<LogScene>) {
    let host = session.host();
    let viewer = session.viewer();
    log::info!(
        "[demo] panorama {} | pois {} | markers {} | hovered {:?} selected {:?} cursor {} | {:?}",
        host.panorama().id,
        host.points_of_interest().len(),
        viewer.scene().marker_count(),
        host.hovered(),
        host.selected(),
        viewer.scene().cursor().as_css(),
        host.current_poi_description()
    );
}
