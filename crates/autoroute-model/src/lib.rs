//! Card/port/profile model and in-memory host for the autoroute controller.
//!
//! The host owns every object in a single arena ([`Core`]) and hands out
//! copyable handles ([`CardId`], [`PortId`], [`ProfileId`], [`DeviceId`]).
//! [`Server`] wraps the arena with the four hooks listeners subscribe to:
//! card creation, sink creation, source creation and port availability changes.

pub mod error;
pub use error::{Error, Result};

mod types;
pub use types::{Availability, CardId, DeviceId, DeviceKind, Direction, PortId, ProfileId};

mod port;
pub use port::Port;

mod profile;
pub use profile::{DeviceLayout, Profile};

mod card;
pub use card::{Card, Device};

mod proposal;
pub use proposal::{CardNewData, DeviceNewData};

mod change;
pub use change::ModelChange;

mod arena;
pub use arena::{Core, ProfileBackend};

mod hooks;
pub use hooks::{Hook, HookListener, HookPriority, HookResult};

mod server;
pub use server::{ListenerId, Server};
