//! Shared value types: availability, direction and arena handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state availability reported by the hardware detection layer.
///
/// `Unknown` means "no information" and must never drive a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Availability {
    /// Anything that is not a confirmed `No` can be used.
    #[inline]
    pub fn is_usable(self) -> bool {
        match self {
            Availability::Yes | Availability::Unknown => true,
            Availability::No => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Yes => "yes",
            Availability::No => "no",
            Availability::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Output,
    Input,
}

impl Direction {
    /// The device kind that exposes ports of this direction.
    #[inline]
    pub fn device_kind(self) -> DeviceKind {
        match self {
            Direction::Output => DeviceKind::Sink,
            Direction::Input => DeviceKind::Source,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Output => f.write_str("output"),
            Direction::Input => f.write_str("input"),
        }
    }
}

/// Playback (`Sink`) or capture (`Source`) device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Sink,
    Source,
}

impl DeviceKind {
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            DeviceKind::Sink => Direction::Output,
            DeviceKind::Source => Direction::Input,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Sink => f.write_str("sink"),
            DeviceKind::Source => f.write_str("source"),
        }
    }
}

macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_handle!(
    /// Handle to a card in the host arena.
    CardId,
    "card"
);
arena_handle!(
    /// Handle to a port in the host arena.
    PortId,
    "port"
);
arena_handle!(
    /// Handle to a profile in the host arena.
    ProfileId,
    "profile"
);
arena_handle!(
    /// Handle to a sink or source in the host arena.
    DeviceId,
    "device"
);
