//! Controller configuration.

use crate::selector::TieBreak;
use crate::{Error, Result};
use autoroute_model::HookPriority;
use serde::{Deserialize, Serialize};

/// Configuration for the route controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Ordering among equal-priority profiles and ports.
    pub tie_break: TieBreak,
    /// Replay unavailable ports once when the controller is attached.
    pub reconcile_on_attach: bool,
    /// Priority of the `card_new`, `sink_new` and `source_new` subscriptions.
    pub new_object_priority: HookPriority,
    /// Priority of the `port_available_changed` subscription. Must run after
    /// listeners at `Normal` (saved-route restore).
    pub port_available_priority: HookPriority,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::DeclarationOrder,
            reconcile_on_attach: true,
            new_object_priority: HookPriority::Normal,
            port_available_priority: HookPriority::Late,
        }
    }
}

impl SwitchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port_available_priority <= HookPriority::Normal {
            return Err(Error::InvalidConfig(format!(
                "port_available_priority {:?} must be later than Normal",
                self.port_available_priority
            )));
        }
        Ok(())
    }
}
