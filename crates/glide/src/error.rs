//! # GLIDE Error Types
//!
//! Everything the client world can fail at. The core crates never fail;
//! errors only come from the edges (files, config, packets, identities).

use std::path::PathBuf;

use glide_refs::Identity;
use glide_shared::WireError;
use thiserror::Error;

/// Errors returned by the client world and its configuration.
#[derive(Error, Debug)]
pub enum GlideError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML for [`crate::GlideConfig`].
    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),

    /// A config file parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A packet could not be decoded.
    #[error("malformed packet: {0}")]
    Wire(#[from] WireError),

    /// No object is registered under the identity.
    #[error("unknown object: {0}")]
    UnknownObject(Identity),
}

/// Result type for GLIDE operations.
pub type GlideResult<T> = Result<T, GlideError>;
