//! Error types for the host model.

use crate::types::{CardId, DeviceId, PortId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid card: {0}")]
    InvalidCard(String),

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Unknown card: {0}")]
    UnknownCard(CardId),

    #[error("Unknown port: {0}")]
    UnknownPort(PortId),

    #[error("Card {card} has no port named {port}")]
    PortNotFound { card: CardId, port: String },

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unknown device: {0}")]
    UnknownDevice(DeviceId),

    #[error("Profile {profile} does not belong to card {card}")]
    ProfileNotOnCard { card: String, profile: String },

    #[error("Port {port} is not exposed by {device}")]
    PortNotOnDevice { device: String, port: String },

    #[error("Card {card} rejected profile {profile}: {reason}")]
    ProfileRejected {
        card: String,
        profile: String,
        reason: String,
    },

    #[error("Creation of {0} cancelled by a hook")]
    Cancelled(String),
}

pub type Result<T> = std::result::Result<T, Error>;
