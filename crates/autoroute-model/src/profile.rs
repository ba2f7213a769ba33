//! Card profiles and the device layouts they instantiate.

use crate::types::Availability;
use serde::{Deserialize, Serialize};

/// A sink or source the host creates when its profile becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLayout {
    pub name: String,
    /// Port names, in the order the device exposes them.
    pub ports: Vec<String>,
}

impl DeviceLayout {
    pub fn new<I, S>(name: impl Into<String>, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ports: ports.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named configuration of a card.
///
/// The capability counts are what the evaluator compares; the layouts are what
/// the host turns into live sinks and sources. Adding a layout through
/// [`with_sink`](Self::with_sink) / [`with_source`](Self::with_source) keeps
/// the two consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub description: String,
    pub priority: u32,
    pub n_sinks: u32,
    pub n_sources: u32,
    pub max_sink_channels: u32,
    pub max_source_channels: u32,
    pub available: Availability,
    pub sinks: Vec<DeviceLayout>,
    pub sources: Vec<DeviceLayout>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            priority: 0,
            n_sinks: 0,
            n_sources: 0,
            max_sink_channels: 0,
            max_source_channels: 0,
            available: Availability::Unknown,
            sinks: Vec::new(),
            sources: Vec::new(),
        }
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

    pub fn with_sink<I, S>(mut self, name: impl Into<String>, ports: I, channels: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sinks.push(DeviceLayout::new(name, ports));
        self.n_sinks += 1;
        self.max_sink_channels = self.max_sink_channels.max(channels);
        self
    }

    pub fn with_source<I, S>(mut self, name: impl Into<String>, ports: I, channels: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(DeviceLayout::new(name, ports));
        self.n_sources += 1;
        self.max_source_channels = self.max_source_channels.max(channels);
        self
    }

    /// Declared capability only, without a device layout.
    pub fn with_sink_capacity(mut self, n_sinks: u32, max_channels: u32) -> Self {
        self.n_sinks = n_sinks;
        self.max_sink_channels = max_channels;
        self
    }

    /// Declared capability only, without a device layout.
    pub fn with_source_capacity(mut self, n_sources: u32, max_channels: u32) -> Self {
        self.n_sources = n_sources;
        self.max_source_channels = max_channels;
        self
    }

    /// Every port name referenced by a sink or source layout.
    pub fn layout_ports(&self) -> impl Iterator<Item = &str> {
        self.sinks
            .iter()
            .chain(self.sources.iter())
            .flat_map(|layout| layout.ports.iter().map(String::as_str))
    }
}
