//! Pre-commit proposals handed to the `*_new` hooks.
//!
//! A proposal describes an object the host is about to create. Listeners may
//! rewrite the suggested profile or port before the host commits it.

use crate::port::Port;
use crate::profile::Profile;
use crate::types::{CardId, DeviceKind, PortId};

/// A card about to be inserted.
#[derive(Debug, Clone)]
pub struct CardNewData {
    pub name: String,
    pub ports: Vec<Port>,
    pub profiles: Vec<Profile>,
    /// Suggested active profile. `None` lets the host pick the highest priority.
    pub active_profile: Option<String>,
    pub save_profile: bool,
}

impl CardNewData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
            profiles: Vec::new(),
            active_profile: None,
            save_profile: false,
        }
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// A suggestion coming from a stored user preference.
    pub fn with_saved_profile(mut self, name: impl Into<String>) -> Self {
        self.active_profile = Some(name.into());
        self.save_profile = true;
        self
    }

    pub fn with_active_profile(mut self, name: impl Into<String>) -> Self {
        self.active_profile = Some(name.into());
        self
    }

    pub fn set_profile(&mut self, name: impl Into<String>) {
        self.active_profile = Some(name.into());
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }
}

/// A sink or source about to be created.
#[derive(Debug, Clone)]
pub struct DeviceNewData {
    pub name: String,
    pub kind: DeviceKind,
    pub card: Option<CardId>,
    /// Ports the device will expose, already registered with the host.
    pub ports: Vec<PortId>,
    /// Suggested active port name. `None` lets the host pick the highest priority.
    pub active_port: Option<String>,
    pub save_port: bool,
}

impl DeviceNewData {
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            card: None,
            ports: Vec::new(),
            active_port: None,
            save_port: false,
        }
    }

    pub fn set_port(&mut self, name: impl Into<String>) {
        self.active_port = Some(name.into());
    }
}
