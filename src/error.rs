//! Centralized error type for the autoroute umbrella crate.
//!
//! Wraps the subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] autoroute_model::Error),

    #[cfg(feature = "switch")]
    #[error("Switch: {0}")]
    Switch(#[from] autoroute_switch::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
