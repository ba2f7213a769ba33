//! # autoroute - automatic audio route switching
//!
//! Moves playback and capture to the right jack when headphones, headsets or
//! HDMI sinks come and go.
//!
//! ## Architecture
//!
//! autoroute is an umbrella crate that coordinates:
//! - **autoroute-model** - Cards, ports, profiles, sinks/sources and the hook bus
//! - **autoroute-switch** - The route controller reacting to availability changes
//!
//! ## Quick Start
//!
//! ```ignore
//! use autoroute::prelude::*;
//!
//! let mut system = RouteSystem::builder().build()?;
//!
//! let card = system.put_card(
//!     CardNewData::new("pci-0000_00_1f.3")
//!         .with_port(Port::output("analog-output-speaker").with_priority(10000))
//!         .with_port(Port::output("analog-output-headphones").with_priority(9900))
//!         .with_profile(
//!             Profile::new("output:analog-stereo")
//!                 .with_sink("analog-stereo", ["analog-output-speaker", "analog-output-headphones"], 2),
//!         ),
//! )?;
//!
//! // Headphones plugged in: the sink moves to them.
//! system.set_named_port_available(card, "analog-output-headphones", Availability::Yes)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Host model and route controller
//! - `switch` - Route controller and [`RouteSystem`]

/// Re-export of autoroute-model for direct access
pub use autoroute_model as model;

pub use autoroute_model::{
    Availability, Card, CardId, CardNewData, Core, Device, DeviceId, DeviceKind, DeviceLayout,
    DeviceNewData, Direction, Hook, HookListener, HookPriority, HookResult, ListenerId,
    ModelChange, Port, PortId, Profile, ProfileBackend, ProfileId, Server,
};

mod error;
pub use error::{Error, Result};

/// Route controller (feature `switch`)
#[cfg(feature = "switch")]
pub use autoroute_switch as switch;

#[cfg(feature = "switch")]
pub use autoroute_switch::{
    Outcome, RouteController, Skip, StatsSnapshot, Switch, SwitchConfig, SwitchError, TieBreak,
};

#[cfg(feature = "switch")]
mod builder;
#[cfg(feature = "switch")]
mod system;

#[cfg(feature = "switch")]
pub use builder::RouteSystemBuilder;
#[cfg(feature = "switch")]
pub use system::RouteSystem;

/// Convenience prelude for common imports
pub mod prelude {
    // Host model
    pub use crate::{
        Availability, CardId, CardNewData, Core, DeviceKind, Direction, HookListener,
        HookPriority, HookResult, Port, PortId, Profile, Server,
    };

    // Route controller
    #[cfg(feature = "switch")]
    pub use crate::{Outcome, RouteSystem, RouteSystemBuilder, SwitchConfig, TieBreak};
}
