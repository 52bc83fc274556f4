use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundaryError {
    #[error("window {0} is not mounted in this boundary")]
    UnknownWindow(WindowId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("window must be used within a boundary (found `{0}` outside one)")]
    WindowOutsideBoundary(&'static str),
    #[error("boundary cannot contain `{0}`; only windows and pads are allowed")]
    UnsupportedBoundaryChild(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("popups must be shown within a popup provider")]
    NoProvider,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("promotion delay must be between {min} and {max} ms (got {value})")]
    PromotionDelay { value: u64, min: u64, max: u64 },
    #[error("jitter threshold must be at most {max} cells (got {value})")]
    JitterThreshold { value: u32, max: u32 },
    #[error("poll interval must be between {min} and {max} ms (got {value})")]
    PollInterval { value: u64, min: u64, max: u64 },
}

/// Everything the demo binary can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}
