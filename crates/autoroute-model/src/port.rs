//! Physical connectors of a card.

use crate::types::{Availability, CardId, Direction};
use serde::{Deserialize, Serialize};

/// A jack or connector on a card.
///
/// Once a port is inserted into the [`Core`](crate::Core) it is only reachable
/// by shared reference; availability changes go through
/// [`Core::set_port_available`](crate::Core::set_port_available).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub description: String,
    pub direction: Direction,
    pub priority: u32,
    pub available: Availability,
    profiles: Vec<String>,
    #[serde(skip)]
    card: Option<CardId>,
}

impl Port {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            direction,
            priority: 0,
            available: Availability::Unknown,
            profiles: Vec::new(),
            card: None,
        }
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Output)
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Input)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_available(mut self, available: Availability) -> Self {
        self.available = available;
        self
    }

    /// Declare membership in a profile. Duplicates are ignored.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.add_profile(profile);
        self
    }

    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for profile in profiles {
            self.add_profile(profile);
        }
        self
    }

    pub(crate) fn add_profile(&mut self, profile: impl Into<String>) {
        let profile = profile.into();
        if !self.supports(&profile) {
            self.profiles.push(profile);
        }
    }

    /// Whether the named profile lists this port.
    #[inline]
    pub fn supports(&self, profile: &str) -> bool {
        self.profiles.iter().any(|p| p == profile)
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Owning card. `None` only for ports inserted on their own.
    #[inline]
    pub fn card(&self) -> Option<CardId> {
        self.card
    }

    pub(crate) fn attach(&mut self, card: CardId) {
        self.card = Some(card);
    }
}
