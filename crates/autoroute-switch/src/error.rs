//! Error types for the route controller.

use autoroute_model::PortId;
use thiserror::Error;

/// Setup errors (configuration, host access outside event handling).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Host: {0}")]
    Model(#[from] autoroute_model::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why an availability event had no effect.
///
/// None of these are fatal: the event is consumed and the previous routing
/// stays in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    #[error("No suitable profile found for port {port}")]
    NoSuitableProfile { port: String },

    #[error("Could not set profile {profile}")]
    ProfileCommitRejected {
        profile: String,
        #[source]
        source: autoroute_model::Error,
    },

    #[error("Port {0} does not have a card")]
    MissingCardReference(String),

    #[error("No sink or source exposes port {0}")]
    NoCapableDeviceExposesPort(String),

    #[error("Unknown port: {0}")]
    UnknownPort(PortId),

    #[error("Host rejected a port change: {0}")]
    Host(#[from] autoroute_model::Error),
}
