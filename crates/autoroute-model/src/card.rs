//! Cards and the live sinks/sources created from their active profile.

use crate::types::{CardId, DeviceId, DeviceKind, PortId, ProfileId};

/// A physical device group.
///
/// Owned by the [`Core`](crate::Core); every field is read-only from the
/// outside and changes through the host mutation API.
#[derive(Debug, Clone)]
pub struct Card {
    pub(crate) name: String,
    pub(crate) ports: Vec<PortId>,
    pub(crate) profiles: Vec<ProfileId>,
    pub(crate) sinks: Vec<DeviceId>,
    pub(crate) sources: Vec<DeviceId>,
    pub(crate) active_profile: ProfileId,
    pub(crate) save_profile: bool,
}

impl Card {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ports in declaration order.
    pub fn ports(&self) -> &[PortId] {
        &self.ports
    }

    /// Profiles in declaration order.
    pub fn profiles(&self) -> &[ProfileId] {
        &self.profiles
    }

    pub fn sinks(&self) -> &[DeviceId] {
        &self.sinks
    }

    pub fn sources(&self) -> &[DeviceId] {
        &self.sources
    }

    pub fn devices(&self, kind: DeviceKind) -> &[DeviceId] {
        match kind {
            DeviceKind::Sink => &self.sinks,
            DeviceKind::Source => &self.sources,
        }
    }

    #[inline]
    pub fn active_profile(&self) -> ProfileId {
        self.active_profile
    }

    /// Whether the active profile was chosen by the user and should be remembered.
    #[inline]
    pub fn save_profile(&self) -> bool {
        self.save_profile
    }

    /// True while the card has not instantiated any sink or source yet.
    #[inline]
    pub fn is_initializing(&self) -> bool {
        self.sinks.is_empty() && self.sources.is_empty()
    }
}

/// A live sink (playback) or source (capture).
#[derive(Debug, Clone)]
pub struct Device {
    pub(crate) name: String,
    pub(crate) kind: DeviceKind,
    pub(crate) card: Option<CardId>,
    pub(crate) ports: Vec<PortId>,
    pub(crate) active_port: Option<PortId>,
    pub(crate) save_port: bool,
}

impl Device {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    #[inline]
    pub fn card(&self) -> Option<CardId> {
        self.card
    }

    pub fn ports(&self) -> &[PortId] {
        &self.ports
    }

    #[inline]
    pub fn exposes(&self, port: PortId) -> bool {
        self.ports.contains(&port)
    }

    #[inline]
    pub fn active_port(&self) -> Option<PortId> {
        self.active_port
    }

    #[inline]
    pub fn save_port(&self) -> bool {
        self.save_port
    }
}
