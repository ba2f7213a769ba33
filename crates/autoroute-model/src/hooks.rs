//! Host event bus contract.
//!
//! A listener subscribes to any of the four lifecycle/availability hooks with
//! a priority. The [`Server`](crate::Server) calls subscribed listeners in
//! priority order (`Early`, `Normal`, `Late`), then registration order.

use crate::arena::Core;
use crate::proposal::{CardNewData, DeviceNewData};
use crate::types::PortId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    CardNew,
    SinkNew,
    SourceNew,
    PortAvailableChanged,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HookPriority {
    Early,
    #[default]
    Normal,
    Late,
}

/// What the dispatcher does after a listener returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue with the next listener.
    Ok,
    /// Skip the remaining listeners for this event.
    Stop,
    /// Abort creation of the proposed object (`*_new` hooks only).
    Cancel,
}

pub trait HookListener {
    /// Subscription priority for `hook`, `None` when not subscribed.
    fn priority(&self, hook: Hook) -> Option<HookPriority>;

    fn card_new(&mut self, _core: &Core, _data: &mut CardNewData) -> HookResult {
        HookResult::Ok
    }

    fn sink_new(&mut self, _core: &Core, _data: &mut DeviceNewData) -> HookResult {
        HookResult::Ok
    }

    fn source_new(&mut self, _core: &Core, _data: &mut DeviceNewData) -> HookResult {
        HookResult::Ok
    }

    fn port_available_changed(&mut self, _core: &mut Core, _port: PortId) -> HookResult {
        HookResult::Ok
    }
}
