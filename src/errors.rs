//! Custom error types for porecall operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for porecall operations
pub type Result<T> = std::result::Result<T, PorecallError>;

/// Error type for porecall operations
#[derive(Error, Debug)]
pub enum PorecallError {
    /// A task batch was executed before a basecaller was injected
    #[error("basecaller is not set; call set_caller() before executing a task batch")]
    CallerNotSet,

    /// Container-level I/O failure (file vanished, unreadable, corrupt)
    #[error("container I/O error for '{path}': {source}")]
    ContainerIo {
        /// Path of the container file involved
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Experiment start timestamp did not parse as `%Y-%m-%dT%H:%M:%SZ`
    #[error("invalid experiment start timestamp '{value}'")]
    InvalidTimestamp {
        /// The offending timestamp string
        value: String,
    },

    /// A read reported a sampling rate that cannot convert samples to seconds
    #[error("invalid sampling rate {rate} for read '{read_id}'")]
    InvalidSamplingRate {
        /// The offending rate
        rate: f64,
        /// The read it was reported for
        read_id: String,
    },

    /// Directory watching has no native backend on this platform
    #[error("directory watching is not implemented on this platform ({platform})")]
    WatchUnsupported {
        /// `std::env::consts::OS` at the failure site
        platform: &'static str,
    },

    /// The platform watch backend failed to register or deliver events
    #[error("directory watch error: {reason}")]
    Watch {
        /// Backend-specific description of the failure
        reason: String,
    },

    /// Generic I/O error from input scanning
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PorecallError {
    /// Wraps an I/O error with the container path it occurred on.
    pub fn container_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ContainerIo { path: path.into(), source }
    }

    /// True for container-level errors recovered at batch granularity,
    /// false for configuration and platform errors that must surface to
    /// the integrator.
    #[must_use]
    pub fn is_batch_recoverable(&self) -> bool {
        matches!(self, Self::ContainerIo { .. } | Self::Io(_))
    }
}
