//! Headless walkthrough: log in, spin the cube for a while, press the center
//! of the screen and log out again.
//!
//! ```text
//! RUST_LOG=cubic_gallery=debug cargo run -- [config.toml]
//! ```

use cubic_gallery::{
    App, AppError, GalleryConfig, GalleryEvent, HeadlessHost, PasswordGate, Vec2,
};
use tracing_subscriber::EnvFilter;

const PASSWORD_ENV: &str = "CUBIC_GALLERY_PASSWORD";
const DEFAULT_PASSWORD: &str = "gallery";
const FRAMES: usize = 120;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GalleryConfig::load(&path)?,
        None => GalleryConfig::default(),
    };
    // bounds grid_size, so the capacity below cannot overflow
    config.validate()?;
    let capacity = 6 * (config.grid_size as usize).pow(2);
    let sources: Vec<String> = (0..capacity).map(|i| format!("/assets/{i}.jpg")).collect();

    let password = std::env::var(PASSWORD_ENV).unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());
    let gate = PasswordGate::from_password(&password);

    let mut host = HeadlessHost::new(1280.0, 720.0);
    let mut app = App::new(config, sources, gate);

    if let Err(err) = app.login("not the password", &mut host) {
        tracing::info!(%err, "login refused as expected");
    }
    app.login(&password, &mut host)?;

    // Park the pointer up and to the left of center: the cube keeps turning.
    app.handle_event(GalleryEvent::PointerMove(Vec2::new(320.0, 180.0)), &mut host);
    for _ in 0..FRAMES {
        let Some(frame) = host.next_frame() else {
            break;
        };
        app.handle_event(frame, &mut host);
    }

    // Recenter so the cube holds still, then press the middle of the screen.
    app.handle_event(GalleryEvent::PointerMove(Vec2::new(640.0, 360.0)), &mut host);
    if let Some(frame) = host.next_frame() {
        app.handle_event(frame, &mut host);
    }
    app.handle_event(GalleryEvent::PointerDown(Vec2::new(640.0, 360.0)), &mut host);

    if let Some(gallery) = app.gallery() {
        let orientation = gallery.orientation();
        match gallery.selected() {
            Some(tile) => tracing::info!(
                yaw = orientation.yaw,
                pitch = orientation.pitch,
                tile = tile.id.0,
                face = ?tile.cell.face,
                source = %tile.source,
                "pressed tile"
            ),
            None => tracing::info!(
                yaw = orientation.yaw,
                pitch = orientation.pitch,
                "press landed between tiles"
            ),
        }
    }

    app.logout(&mut host);
    tracing::info!(pending_frames = host.pending_frames(), "done");
    Ok(())
}
