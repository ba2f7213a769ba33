//! Event counters for the route controller.

use crate::controller::Outcome;
use crate::error::SwitchError;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Availability events handled.
    pub events: u64,
    pub ignored: u64,
    pub profile_switches: u64,
    pub port_switches: u64,
    /// Lost active ports with no usable replacement.
    pub kept_unavailable: u64,
    pub errors: u64,
    /// Card proposals whose initial profile was corrected.
    pub profile_corrections: u64,
    /// Device proposals whose initial port was overridden.
    pub port_overrides: u64,
}

#[derive(Debug, Default)]
struct SwitchStats {
    events: AtomicU64,
    ignored: AtomicU64,
    profile_switches: AtomicU64,
    port_switches: AtomicU64,
    kept_unavailable: AtomicU64,
    errors: AtomicU64,
    profile_corrections: AtomicU64,
    port_overrides: AtomicU64,
}

/// Shared handle to the controller's counters. Clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct StatsHandle(Arc<SwitchStats>);

impl StatsHandle {
    pub(crate) fn record(&self, result: &std::result::Result<Outcome, SwitchError>) {
        let stats = &self.0;
        stats.events.fetch_add(1, Ordering::Relaxed);
        match result {
            Ok(Outcome::Ignored(_)) => {
                stats.ignored.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Outcome::Switched(switch)) => {
                if switch.profile.is_some() {
                    stats.profile_switches.fetch_add(1, Ordering::Relaxed);
                }
                stats
                    .port_switches
                    .fetch_add(switch.ports.len() as u64, Ordering::Relaxed);
            }
            Ok(Outcome::KeptUnavailable(_)) => {
                stats.kept_unavailable.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                stats.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub(crate) fn record_profile_correction(&self) {
        self.0.profile_corrections.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_port_override(&self) {
        self.0.port_overrides.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let stats = &self.0;
        StatsSnapshot {
            events: stats.events.load(Ordering::Relaxed),
            ignored: stats.ignored.load(Ordering::Relaxed),
            profile_switches: stats.profile_switches.load(Ordering::Relaxed),
            port_switches: stats.port_switches.load(Ordering::Relaxed),
            kept_unavailable: stats.kept_unavailable.load(Ordering::Relaxed),
            errors: stats.errors.load(Ordering::Relaxed),
            profile_corrections: stats.profile_corrections.load(Ordering::Relaxed),
            port_overrides: stats.port_overrides.load(Ordering::Relaxed),
        }
    }
}
