//! Error types for the stratus compiler

use thiserror::Error;

use crate::resources::CloudProvider;

/// Main error type for stratus operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Validation error for resource specs
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced sibling resource has no output for the target cloud
    ///
    /// Raised when a reference (subnet, resource group, location) cannot be
    /// resolved because the referenced resource was never translated for that
    /// cloud. Distinct from [`Error::UnsupportedCloud`] so callers can react
    /// differently (alert vs. skip).
    #[error("cannot resolve {kind} {id:?} for cloud {cloud}")]
    Resolution {
        /// Kind of the referenced resource (e.g. "subnet")
        kind: &'static str,
        /// Identifier of the referenced resource
        id: String,
        /// Cloud the resolution was attempted for
        cloud: CloudProvider,
    },

    /// The target cloud is not implemented for this resource type
    #[error("cloud {cloud} is not supported for this resource type")]
    UnsupportedCloud {
        /// The offending cloud
        cloud: CloudProvider,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a resolution error for a reference that has no output
    pub fn resolution(kind: &'static str, id: impl Into<String>, cloud: CloudProvider) -> Self {
        Self::Resolution {
            kind,
            id: id.into(),
            cloud,
        }
    }

    /// Create an unsupported-cloud error for the given cloud
    pub fn unsupported_cloud(cloud: CloudProvider) -> Self {
        Self::UnsupportedCloud { cloud }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
