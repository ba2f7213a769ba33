//! Route controller: reacts to availability changes and corrects initial
//! profile/port proposals.
//!
//! The controller holds no routing state of its own. Every handler looks the
//! port, card and devices up again in the host model, so a handle that went
//! stale between events simply resolves to nothing.

use crate::config::SwitchConfig;
use crate::error::{Result, SwitchError};
use crate::selector::{profile_contains_available_ports, ProfileSelector};
use crate::stats::StatsHandle;
use autoroute_model::{
    Availability, CardId, CardNewData, Core, DeviceId, DeviceKind, DeviceNewData, Direction,
    Hook, HookListener, HookPriority, HookResult, PortId, ProfileId,
};

/// Why an availability event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The port reported `Unknown`.
    UnknownAvailability,
    /// The card has no sinks or sources yet.
    CardInitializing,
    /// The port became unavailable but nothing was using it.
    NotActivePort,
    /// The port became available and is already in use.
    AlreadyActive,
}

/// Selection changes made for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    /// New active profile, if the card profile changed.
    pub profile: Option<ProfileId>,
    /// Devices whose active port changed, with the new port.
    pub ports: Vec<(DeviceId, PortId)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(Skip),
    Switched(Switch),
    /// The active port of this device went away and none of its other ports
    /// is usable, so it stays selected.
    KeptUnavailable(DeviceId),
}

/// Listener implementing automatic switching.
#[derive(Debug, Clone)]
pub struct RouteController {
    config: SwitchConfig,
    selector: ProfileSelector,
    stats: StatsHandle,
}

impl RouteController {
    pub fn new(config: SwitchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            selector: ProfileSelector::new(config.tie_break),
            config,
            stats: StatsHandle::default(),
        })
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub fn selector(&self) -> &ProfileSelector {
        &self.selector
    }

    pub fn stats(&self) -> StatsHandle {
        self.stats.clone()
    }

    /// Correct a card proposal whose active profile has no usable port.
    ///
    /// Returns whether the proposal was changed. A corrected profile is not
    /// marked for persistence.
    pub fn on_card_new(&self, data: &mut CardNewData) -> bool {
        let usable = data
            .active_profile
            .as_deref()
            .and_then(|name| data.profile(name))
            .is_some_and(|profile| profile_contains_available_ports(profile, &data.ports));
        if usable {
            return false;
        }

        let Some(best) = self.selector.find_best_profile_with_available_ports(data) else {
            return false;
        };
        let name = best.name.clone();
        tracing::debug!(
            "Card {}: initial profile has no available ports, using {}",
            data.name,
            name
        );
        data.set_profile(name);
        data.save_profile = false;
        self.stats.record_profile_correction();
        true
    }

    /// Override the initial port of a sink or source proposal when it points
    /// at an unavailable port. Returns the override.
    pub fn on_device_new(&self, core: &Core, data: &mut DeviceNewData) -> Option<PortId> {
        let port = self
            .selector
            .pick_initial_port(core, &data.ports, data.active_port.as_deref())?;
        let name = core.port(port)?.name.clone();

        tracing::debug!(
            "Switching initial port for {} '{}' to '{}'",
            data.kind,
            data.name,
            name
        );
        data.set_port(name);
        self.stats.record_port_override();
        Some(port)
    }

    /// Handle an availability change of `port`, logging and counting the
    /// result.
    pub fn on_port_available(
        &self,
        core: &mut Core,
        port: PortId,
    ) -> std::result::Result<Outcome, SwitchError> {
        let result = self.transition(core, port);
        match &result {
            Ok(outcome) => tracing::trace!("Port {}: {:?}", port, outcome),
            Err(err @ SwitchError::MissingCardReference(_)) => tracing::warn!("{}", err),
            Err(err @ SwitchError::Host(_)) => tracing::warn!("{}", err),
            Err(SwitchError::ProfileCommitRejected { profile, source }) => {
                tracing::debug!("Could not set profile {}: {}", profile, source)
            }
            Err(err) => tracing::debug!("{}", err),
        }
        self.stats.record(&result);
        result
    }

    fn transition(
        &self,
        core: &mut Core,
        port_id: PortId,
    ) -> std::result::Result<Outcome, SwitchError> {
        let port = core.port(port_id).ok_or(SwitchError::UnknownPort(port_id))?;
        let available = port.available;
        if available == Availability::Unknown {
            return Ok(Outcome::Ignored(Skip::UnknownAvailability));
        }

        let card_id = port
            .card()
            .filter(|&card| core.card(card).is_some())
            .ok_or_else(|| SwitchError::MissingCardReference(port.name.clone()))?;
        if core.card(card_id).is_some_and(|card| card.is_initializing()) {
            return Ok(Outcome::Ignored(Skip::CardInitializing));
        }

        let name = port.name.clone();
        let direction = port.direction;
        let is_active_profile = core
            .active_profile(card_id)
            .is_some_and(|(_, profile)| port.supports(&profile.name));
        let device = find_device(core, card_id, port_id, direction);
        let is_active_port = device
            .and_then(|id| core.device(id))
            .is_some_and(|device| device.active_port() == Some(port_id));

        match available {
            Availability::Unknown => Ok(Outcome::Ignored(Skip::UnknownAvailability)),
            Availability::No if !is_active_port => Ok(Outcome::Ignored(Skip::NotActivePort)),
            Availability::No => self.replace_lost_port(core, device, port_id),
            Availability::Yes if is_active_port => Ok(Outcome::Ignored(Skip::AlreadyActive)),
            Availability::Yes => {
                self.activate_port(core, card_id, port_id, &name, is_active_profile, device)
            }
        }
    }

    fn activate_port(
        &self,
        core: &mut Core,
        card: CardId,
        port: PortId,
        name: &str,
        is_active_profile: bool,
        mut device: Option<DeviceId>,
    ) -> std::result::Result<Outcome, SwitchError> {
        let mut profile = None;
        let mut ports = Vec::new();

        if !is_active_profile {
            let best = self
                .selector
                .select_best_profile(core, port)
                .ok_or_else(|| SwitchError::NoSuitableProfile {
                    port: name.to_string(),
                })?;
            let profile_name = core
                .profile(best)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| best.to_string());

            core.set_active_profile(card, best, false)
                .map_err(|source| SwitchError::ProfileCommitRejected {
                    profile: profile_name,
                    source,
                })?;
            profile = Some(best);

            let direction = core
                .port(port)
                .map(|p| p.direction)
                .ok_or(SwitchError::UnknownPort(port))?;
            device = find_device(core, card, port, direction);
            ports = self.settle_recreated_devices(core, card, device);
        }

        let Some(device) = device else {
            if profile.is_none() {
                return Err(SwitchError::NoCapableDeviceExposesPort(name.to_string()));
            }
            return Ok(Outcome::Switched(Switch { profile, ports }));
        };

        let previous = core.device(device).and_then(|d| d.active_port());
        let selected = if profile.is_some() {
            apply_port_moves(core, vec![(device, port)])
        } else {
            core.set_active_port(device, port, false)?;
            vec![(device, port)]
        };
        ports.extend(selected.into_iter().filter(|_| previous != Some(port)));

        Ok(Outcome::Switched(Switch { profile, ports }))
    }

    /// Devices recreated by a profile switch start on their highest-priority
    /// port. Move the ones that start on an unavailable port, except `target`.
    fn settle_recreated_devices(
        &self,
        core: &mut Core,
        card: CardId,
        target: Option<DeviceId>,
    ) -> Vec<(DeviceId, PortId)> {
        let shared: &Core = core;
        let overrides: Vec<_> = [DeviceKind::Sink, DeviceKind::Source]
            .into_iter()
            .flat_map(move |kind| shared.card_devices(card, kind))
            .filter(|&(id, _)| Some(id) != target)
            .filter_map(|(id, device)| {
                let current = device
                    .active_port()
                    .and_then(|port| shared.port(port))
                    .map(|port| port.name.as_str());
                self.selector
                    .pick_initial_port(shared, device.ports(), current)
                    .map(|port| (id, port))
            })
            .collect();

        apply_port_moves(core, overrides)
    }

    fn replace_lost_port(
        &self,
        core: &mut Core,
        device: Option<DeviceId>,
        lost: PortId,
    ) -> std::result::Result<Outcome, SwitchError> {
        let Some(device) = device else {
            return Ok(Outcome::Ignored(Skip::NotActivePort));
        };
        let ports = core
            .device(device)
            .map(|d| d.ports().to_vec())
            .unwrap_or_default();

        match self.selector.find_best_available_port(core, &ports) {
            Some(replacement) => {
                core.set_active_port(device, replacement, false)?;
                Ok(Outcome::Switched(Switch {
                    profile: None,
                    ports: vec![(device, replacement)],
                }))
            }
            None => {
                tracing::debug!(
                    "{}: no available port left, keeping {} active",
                    device,
                    lost
                );
                Ok(Outcome::KeptUnavailable(device))
            }
        }
    }
}

/// Select ports after a committed profile switch. The profile stays switched
/// when the host refuses one of them; refusals are logged and left out.
fn apply_port_moves(core: &mut Core, moves: Vec<(DeviceId, PortId)>) -> Vec<(DeviceId, PortId)> {
    moves
        .into_iter()
        .filter(|&(device, port)| match core.set_active_port(device, port, false) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("{}: port {} not selected after profile switch: {}", device, port, err);
                false
            }
        })
        .collect()
}

/// The sink (output port) or source (input port) of `card` exposing `port`.
fn find_device(
    core: &Core,
    card: CardId,
    port: PortId,
    direction: Direction,
) -> Option<DeviceId> {
    core.card_devices(card, direction.device_kind())
        .find(|(_, device)| device.exposes(port))
        .map(|(id, _)| id)
}

impl HookListener for RouteController {
    fn priority(&self, hook: Hook) -> Option<HookPriority> {
        match hook {
            Hook::CardNew | Hook::SinkNew | Hook::SourceNew => Some(self.config.new_object_priority),
            Hook::PortAvailableChanged => Some(self.config.port_available_priority),
        }
    }

    fn card_new(&mut self, _core: &Core, data: &mut CardNewData) -> HookResult {
        self.on_card_new(data);
        HookResult::Ok
    }

    fn sink_new(&mut self, core: &Core, data: &mut DeviceNewData) -> HookResult {
        self.on_device_new(core, data);
        HookResult::Ok
    }

    fn source_new(&mut self, core: &Core, data: &mut DeviceNewData) -> HookResult {
        self.on_device_new(core, data);
        HookResult::Ok
    }

    fn port_available_changed(&mut self, core: &mut Core, port: PortId) -> HookResult {
        let _ = self.on_port_available(core, port);
        HookResult::Ok
    }
}
