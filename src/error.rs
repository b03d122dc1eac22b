//! Error types for the vector display

use crate::backend::BackendError;
use thiserror::Error;

/// A rejected configuration value.
///
/// Setters return this and leave the previous value in place.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("thickness must be greater than zero, got {0}")]
    InvalidThickness(f32),
    #[error("decay must be in [0, 1), got {0}")]
    InvalidDecay(f32),
    #[error("initial decay must be in [0, 1), got {0}")]
    InvalidInitialDecay(f32),
    #[error("steps must be in [0, 300], got {0}")]
    InvalidSteps(usize),
}

/// Display-level error
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// `begin_draw` was called while a path was still open.
    ///
    /// This is a programmer error; hosts should not try to recover from it.
    #[error("a path is already open; end_draw must be called before begin_draw")]
    PathAlreadyOpen,
    #[error("display has not been set up on a backend")]
    NotSetUp,
}

pub type DisplayResult<T> = Result<T, DisplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::InvalidDecay(1.5).to_string(),
            "decay must be in [0, 1), got 1.5"
        );
        assert_eq!(
            ConfigError::InvalidSteps(301).to_string(),
            "steps must be in [0, 300], got 301"
        );
    }

    #[test]
    fn test_display_error_from_config() {
        let err: DisplayError = ConfigError::InvalidThickness(0.0).into();
        assert!(matches!(
            err,
            DisplayError::Config(ConfigError::InvalidThickness(_))
        ));
    }
}
