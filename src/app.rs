use thiserror::Error;

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gallery::Gallery;
use crate::host::{GalleryEvent, Host};
use crate::session::{AuthError, SessionGate};

/// Errors surfaced by the app shell.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

/// Login screen in front of a gallery.
///
/// The gallery is mounted only while the gate holds a token, and torn down
/// on logout.
///
/// # Example
/// ```
/// use cubic_gallery::{App, GalleryConfig, HeadlessHost, PasswordGate};
///
/// let mut host = HeadlessHost::new(1280.0, 720.0);
/// let sources = vec!["/assets/a.jpg".to_string()];
/// let mut app = App::new(GalleryConfig::default(), sources, PasswordGate::from_password("pw"));
///
/// assert!(app.login("wrong", &mut host).is_err());
/// app.login("pw", &mut host).unwrap();
/// assert!(app.gallery().is_some());
///
/// app.logout(&mut host);
/// assert!(app.gallery().is_none());
/// ```
pub struct App<G: SessionGate> {
    config: GalleryConfig,
    sources: Vec<String>,
    gate: G,
    gallery: Option<Gallery>,
}

impl<G: SessionGate> App<G> {
    pub fn new(config: GalleryConfig, sources: Vec<String>, gate: G) -> Self {
        Self {
            config,
            sources,
            gate,
            gallery: None,
        }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.current_token().is_some()
    }

    /// Mount the gallery if the gate already holds a token.
    ///
    /// Returns whether a gallery is mounted afterwards.
    pub fn resume(&mut self, host: &mut impl Host) -> Result<bool, AppError> {
        if self.gallery.is_none() && self.is_authenticated() {
            self.mount(host)?;
        }
        Ok(self.gallery.is_some())
    }

    /// Exchange `password` for a token and mount the gallery.
    pub fn login(&mut self, password: &str, host: &mut impl Host) -> Result<(), AppError> {
        self.gate.obtain_token(password)?;
        tracing::info!("login succeeded");
        if self.gallery.is_none() {
            self.mount(host)?;
        }
        Ok(())
    }

    /// Tear down the gallery and forget the token.
    pub fn logout(&mut self, host: &mut impl Host) {
        if let Some(mut gallery) = self.gallery.take() {
            gallery.teardown(host);
        }
        self.gate.clear_token();
        tracing::info!("logged out");
    }

    /// Forward a host event to the mounted gallery, if any.
    pub fn handle_event(&mut self, event: GalleryEvent, host: &mut impl Host) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.handle_event(event, host);
        }
    }

    fn mount(&mut self, host: &mut impl Host) -> Result<(), GalleryError> {
        let gallery = Gallery::mount(self.config.clone(), self.sources.as_slice(), host)?;
        self.gallery = Some(gallery);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EventKind, HeadlessHost};
    use crate::session::PasswordGate;
    use glam::Vec2;

    fn app(config: GalleryConfig) -> App<PasswordGate> {
        let sources = (0..54).map(|i| format!("/assets/{i}.jpg")).collect();
        App::new(config, sources, PasswordGate::from_password("open sesame"))
    }

    #[test]
    fn resume_without_token_stays_logged_out() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut app = app(GalleryConfig::default());
        assert!(!app.resume(&mut host).unwrap());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn failed_login_does_not_mount() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut app = app(GalleryConfig::default());
        let err = app.login("nope", &mut host).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidPassword)));
        assert!(app.gallery().is_none());
        assert!(!app.is_authenticated());
    }

    #[test]
    fn login_mounts_and_logout_tears_down() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut app = app(GalleryConfig::default());

        app.login("open sesame", &mut host).unwrap();
        assert!(app.is_authenticated());
        assert!(host.is_listening(EventKind::PointerDown));

        app.handle_event(GalleryEvent::PointerMove(Vec2::new(0.0, 300.0)), &mut host);
        let frame = host.next_frame().unwrap();
        app.handle_event(frame, &mut host);
        assert_eq!(app.gallery().unwrap().orientation().yaw, 0.625);

        app.logout(&mut host);
        assert!(app.gallery().is_none());
        assert!(!app.is_authenticated());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn resume_with_token_mounts_once() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut app = app(GalleryConfig::default());
        app.login("open sesame", &mut host).unwrap();

        assert!(app.resume(&mut host).unwrap());
        assert_eq!(host.listener_count(), 2);
        app.logout(&mut host);
    }

    #[test]
    fn invalid_config_surfaces_as_gallery_error() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut app = app(GalleryConfig::default().item(-1.0, 40.0));
        let err = app.login("open sesame", &mut host).unwrap_err();
        assert!(matches!(
            err,
            AppError::Gallery(GalleryError::InvalidConfiguration(_))
        ));
        assert!(app.gallery().is_none());
    }
}
