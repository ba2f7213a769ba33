//! Automatic port and profile switching for the autoroute host.
//!
//! [`RouteController`] listens to the host's hooks. When a jack or headset
//! becomes available it moves the owning sink or source to that port,
//! switching the card profile first if needed. When the active port goes
//! away it falls back to the best remaining usable port.
//!
//! Profile switches never change the device layout of the other direction:
//! plugging headphones does not tear down the microphone.

pub mod error;
pub use error::{Error, Result, SwitchError};

mod config;
pub use config::SwitchConfig;

pub mod evaluator;

mod selector;
pub use selector::{profile_contains_available_ports, ProfileSelector, TieBreak};

mod controller;
pub use controller::{Outcome, RouteController, Skip, Switch};

mod bootstrap;
pub use bootstrap::{attach, reconcile, Attachment, Reconciled};

mod stats;
pub use stats::{StatsHandle, StatsSnapshot};
