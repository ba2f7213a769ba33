//! Journal of observable model mutations.

use crate::types::{Availability, CardId, DeviceId, PortId, ProfileId};
use serde::Serialize;

/// One mutation applied by the host, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelChange {
    CardAdded {
        card: CardId,
    },
    CardRemoved {
        card: CardId,
    },
    DeviceCreated {
        card: Option<CardId>,
        device: DeviceId,
    },
    DeviceRemoved {
        card: Option<CardId>,
        device: DeviceId,
    },
    ActiveProfileChanged {
        card: CardId,
        from: ProfileId,
        to: ProfileId,
        persist: bool,
    },
    ActivePortChanged {
        device: DeviceId,
        from: Option<PortId>,
        to: PortId,
        persist: bool,
    },
    PortAvailabilityChanged {
        port: PortId,
        from: Availability,
        to: Availability,
    },
}

impl ModelChange {
    /// Changes to what is routed: profile or port selection and the device
    /// set that follows a profile switch. Hardware reports are excluded.
    pub fn is_selection_change(&self) -> bool {
        match self {
            ModelChange::ActiveProfileChanged { .. }
            | ModelChange::ActivePortChanged { .. }
            | ModelChange::DeviceCreated { .. }
            | ModelChange::DeviceRemoved { .. } => true,
            ModelChange::CardAdded { .. }
            | ModelChange::CardRemoved { .. }
            | ModelChange::PortAvailabilityChanged { .. } => false,
        }
    }
}
