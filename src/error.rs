use thiserror::Error;

/// Errors raised while configuring or mounting a gallery.
///
/// Only setup can fail. Once a gallery is mounted, misses and empty input
/// are treated as ordinary states rather than errors.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Grid or tile dimensions that would produce degenerate geometry.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl GalleryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GalleryError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
