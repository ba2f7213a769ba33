//! Host arena.
//!
//! Owns every card, port, profile and device, hands out copyable handles and
//! implements the model mutation API. Handles are indices into slot vectors;
//! removed objects leave an empty slot so a stale handle resolves to `None`
//! instead of aliasing a newer object.

use crate::card::{Card, Device};
use crate::change::ModelChange;
use crate::error::{Error, Result};
use crate::port::Port;
use crate::profile::Profile;
use crate::proposal::{CardNewData, DeviceNewData};
use crate::types::{Availability, CardId, DeviceId, DeviceKind, Direction, PortId, ProfileId};
use std::collections::HashMap;

/// Card implementor consulted before a profile switch is committed.
///
/// Returning `Err` vetoes the switch (e.g. the device is busy); the card keeps
/// its current profile.
pub trait ProfileBackend {
    fn set_profile(&mut self, card: &Card, profile: &Profile) -> std::result::Result<(), String>;
}

impl<F> ProfileBackend for F
where
    F: FnMut(&Card, &Profile) -> std::result::Result<(), String>,
{
    fn set_profile(&mut self, card: &Card, profile: &Profile) -> std::result::Result<(), String> {
        self(card, profile)
    }
}

#[derive(Default)]
pub struct Core {
    cards: Vec<Option<Card>>,
    ports: Vec<Option<Port>>,
    profiles: Vec<Option<Profile>>,
    devices: Vec<Option<Device>>,
    backends: HashMap<CardId, Box<dyn ProfileBackend>>,
    changes: Vec<ModelChange>,
}

fn slot<T>(slots: &[Option<T>], index: usize) -> Option<&T> {
    slots.get(index).and_then(Option::as_ref)
}

fn check_unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(Error::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        seen.push(name);
    }
    Ok(())
}

impl Core {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Lookup ====================

    pub fn card(&self, id: CardId) -> Option<&Card> {
        slot(&self.cards, id.index())
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        slot(&self.ports, id.index())
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        slot(&self.profiles, id.index())
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        slot(&self.devices, id.index())
    }

    /// Live cards in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = (CardId, &Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(i, card)| card.as_ref().map(|card| (CardId(i as u32), card)))
    }

    /// Resolve a list of port handles, skipping stale ones.
    pub fn ports_of<'a>(
        &'a self,
        ids: &'a [PortId],
    ) -> impl Iterator<Item = (PortId, &'a Port)> + 'a {
        ids.iter()
            .filter_map(move |&id| self.port(id).map(|port| (id, port)))
    }

    pub fn card_ports(&self, card: CardId) -> impl Iterator<Item = (PortId, &Port)> + '_ {
        self.card(card)
            .into_iter()
            .flat_map(move |card| self.ports_of(&card.ports))
    }

    pub fn card_profiles(&self, card: CardId) -> impl Iterator<Item = (ProfileId, &Profile)> + '_ {
        self.card(card).into_iter().flat_map(move |card| {
            card.profiles
                .iter()
                .filter_map(move |&id| self.profile(id).map(|profile| (id, profile)))
        })
    }

    pub fn card_devices(
        &self,
        card: CardId,
        kind: DeviceKind,
    ) -> impl Iterator<Item = (DeviceId, &Device)> + '_ {
        self.card(card).into_iter().flat_map(move |card| {
            card.devices(kind)
                .iter()
                .filter_map(move |&id| self.device(id).map(|device| (id, device)))
        })
    }

    pub fn active_profile(&self, card: CardId) -> Option<(ProfileId, &Profile)> {
        let id = self.card(card)?.active_profile;
        self.profile(id).map(|profile| (id, profile))
    }

    pub fn find_port(&self, card: CardId, name: &str) -> Option<PortId> {
        self.card_ports(card)
            .find(|(_, port)| port.name == name)
            .map(|(id, _)| id)
    }

    pub fn find_profile(&self, card: CardId, name: &str) -> Option<ProfileId> {
        self.card_profiles(card)
            .find(|(_, profile)| profile.name == name)
            .map(|(id, _)| id)
    }

    pub fn find_device(&self, name: &str) -> Option<DeviceId> {
        self.devices
            .iter()
            .enumerate()
            .find(|(_, device)| device.as_ref().is_some_and(|d| d.name == name))
            .map(|(i, _)| DeviceId(i as u32))
    }

    /// Highest-priority port; the first one declared wins a tie.
    fn highest_priority(&self, ports: &[PortId]) -> Option<PortId> {
        let mut best: Option<(PortId, u32)> = None;
        for (id, port) in self.ports_of(ports) {
            if best.is_none_or(|(_, priority)| port.priority > priority) {
                best = Some((id, port.priority));
            }
        }
        best.map(|(id, _)| id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index()).and_then(Option::as_mut)
    }

    // ==================== Insertion ====================

    /// Register a port that is not attached to any card.
    pub fn insert_port(&mut self, port: Port) -> PortId {
        let id = PortId(self.ports.len() as u32);
        self.ports.push(Some(port));
        id
    }

    /// Commit a card proposal. Devices are created separately from
    /// [`device_proposals`](Self::device_proposals) so the caller can run
    /// the `sink_new` / `source_new` hooks on them.
    pub fn insert_card(&mut self, mut data: CardNewData) -> Result<CardId> {
        if data.profiles.is_empty() {
            return Err(Error::InvalidCard(format!("{} has no profiles", data.name)));
        }
        check_unique("port", data.ports.iter().map(|p| p.name.as_str()))?;
        check_unique("profile", data.profiles.iter().map(|p| p.name.as_str()))?;

        for profile in &data.profiles {
            let layouts = profile
                .sinks
                .iter()
                .map(|layout| (layout, Direction::Output))
                .chain(profile.sources.iter().map(|layout| (layout, Direction::Input)));
            for (layout, direction) in layouts {
                for name in &layout.ports {
                    match data.port(name) {
                        None => {
                            return Err(Error::InvalidCard(format!(
                                "profile {} references unknown port {}",
                                profile.name, name
                            )))
                        }
                        Some(port) if port.direction != direction => {
                            return Err(Error::InvalidCard(format!(
                                "{} port {} cannot be exposed by {} {}",
                                port.direction,
                                name,
                                direction.device_kind(),
                                layout.name
                            )))
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let active_name = match data.active_profile.take() {
            Some(name) if data.profile(&name).is_some() => name,
            Some(name) => return Err(Error::UnknownProfile(name)),
            None => data
                .profiles
                .iter()
                .fold(None::<&Profile>, |best, profile| match best {
                    Some(best) if best.priority >= profile.priority => Some(best),
                    _ => Some(profile),
                })
                .map(|profile| profile.name.clone())
                .ok_or_else(|| Error::InvalidCard(format!("{} has no profiles", data.name)))?,
        };

        // A port referenced by a device layout is a member of that profile.
        let memberships: Vec<(String, String)> = data
            .profiles
            .iter()
            .flat_map(|profile| {
                profile
                    .layout_ports()
                    .map(move |port| (port.to_string(), profile.name.clone()))
            })
            .collect();
        for (port_name, profile_name) in memberships {
            if let Some(port) = data.ports.iter_mut().find(|p| p.name == port_name) {
                port.add_profile(profile_name);
            }
        }

        let card_id = CardId(self.cards.len() as u32);
        let active_index = data
            .profiles
            .iter()
            .position(|p| p.name == active_name)
            .ok_or_else(|| Error::UnknownProfile(active_name.clone()))?;

        let ports: Vec<PortId> = data
            .ports
            .into_iter()
            .map(|mut port| {
                port.attach(card_id);
                self.insert_port(port)
            })
            .collect();

        let profiles: Vec<ProfileId> = data
            .profiles
            .into_iter()
            .map(|profile| {
                let id = ProfileId(self.profiles.len() as u32);
                self.profiles.push(Some(profile));
                id
            })
            .collect();

        let active_profile = profiles[active_index];
        tracing::debug!(
            "Created card {}: {} with profile {}",
            card_id,
            data.name,
            active_name
        );

        self.cards.push(Some(Card {
            name: data.name,
            ports,
            profiles,
            sinks: Vec::new(),
            sources: Vec::new(),
            active_profile,
            save_profile: data.save_profile,
        }));
        self.changes.push(ModelChange::CardAdded { card: card_id });
        Ok(card_id)
    }

    /// Proposals for the sinks and sources of the card's active profile.
    pub fn device_proposals(&self, card: CardId) -> Result<Vec<DeviceNewData>> {
        let (_, profile) = self.active_profile(card).ok_or(Error::UnknownCard(card))?;

        let layouts = profile
            .sinks
            .iter()
            .map(|layout| (layout, DeviceKind::Sink))
            .chain(profile.sources.iter().map(|layout| (layout, DeviceKind::Source)));

        Ok(layouts
            .map(|(layout, kind)| {
                let mut data = DeviceNewData::new(layout.name.clone(), kind);
                data.card = Some(card);
                data.ports = layout
                    .ports
                    .iter()
                    .filter_map(|name| self.find_port(card, name))
                    .collect();
                data
            })
            .collect())
    }

    /// Commit a sink or source proposal.
    ///
    /// An unknown suggested port name falls back to the highest-priority port.
    pub fn insert_device(&mut self, data: DeviceNewData) -> Result<DeviceId> {
        if let Some(card) = data.card {
            if self.card(card).is_none() {
                return Err(Error::UnknownCard(card));
            }
        }
        if let Some(&stale) = data.ports.iter().find(|&&id| self.port(id).is_none()) {
            return Err(Error::UnknownPort(stale));
        }

        let active_port = data
            .active_port
            .as_deref()
            .and_then(|name| {
                self.ports_of(&data.ports)
                    .find(|(_, port)| port.name == name)
                    .map(|(id, _)| id)
            })
            .or_else(|| self.highest_priority(&data.ports));

        let id = DeviceId(self.devices.len() as u32);
        if let Some(card) = data.card.and_then(|card| self.card_mut(card)) {
            match data.kind {
                DeviceKind::Sink => card.sinks.push(id),
                DeviceKind::Source => card.sources.push(id),
            }
        }

        tracing::debug!("Created {} {}: {}", data.kind, id, data.name);
        self.devices.push(Some(Device {
            name: data.name,
            kind: data.kind,
            card: data.card,
            ports: data.ports,
            active_port,
            save_port: data.save_port,
        }));
        self.changes.push(ModelChange::DeviceCreated {
            card: data.card,
            device: id,
        });
        Ok(id)
    }

    pub fn set_backend(
        &mut self,
        card: CardId,
        backend: impl ProfileBackend + 'static,
    ) -> Result<()> {
        if self.card(card).is_none() {
            return Err(Error::UnknownCard(card));
        }
        self.backends.insert(card, Box::new(backend));
        Ok(())
    }

    pub fn clear_backend(&mut self, card: CardId) {
        self.backends.remove(&card);
    }

    // ==================== Mutation API ====================

    /// Switch the card to `profile`, recreating its sinks and sources.
    ///
    /// The card's backend may veto the switch, in which case nothing changes.
    pub fn set_active_profile(
        &mut self,
        card: CardId,
        profile: ProfileId,
        persist: bool,
    ) -> Result<()> {
        let c = slot(&self.cards, card.index()).ok_or(Error::UnknownCard(card))?;
        let p = slot(&self.profiles, profile.index())
            .ok_or_else(|| Error::UnknownProfile(profile.to_string()))?;
        if !c.profiles.contains(&profile) {
            return Err(Error::ProfileNotOnCard {
                card: c.name.clone(),
                profile: p.name.clone(),
            });
        }

        let from = c.active_profile;
        if from == profile {
            if let Some(c) = self.card_mut(card) {
                c.save_profile |= persist;
            }
            return Ok(());
        }

        if let Some(backend) = self.backends.get_mut(&card) {
            backend
                .set_profile(c, p)
                .map_err(|reason| Error::ProfileRejected {
                    card: c.name.clone(),
                    profile: p.name.clone(),
                    reason,
                })?;
        }
        tracing::debug!("Card {}: switching profile to {}", c.name, p.name);

        self.remove_devices(card);
        if let Some(c) = self.card_mut(card) {
            c.active_profile = profile;
            c.save_profile = persist;
        }
        self.changes.push(ModelChange::ActiveProfileChanged {
            card,
            from,
            to: profile,
            persist,
        });

        for data in self.device_proposals(card)? {
            self.insert_device(data)?;
        }
        Ok(())
    }

    /// Select `port` on a sink or source. Re-selecting the active port only
    /// updates the persistence flag.
    pub fn set_active_port(&mut self, device: DeviceId, port: PortId, persist: bool) -> Result<()> {
        let d = self
            .devices
            .get_mut(device.index())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownDevice(device))?;

        if !d.ports.contains(&port) {
            let port = slot(&self.ports, port.index())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| port.to_string());
            return Err(Error::PortNotOnDevice {
                device: d.name.clone(),
                port,
            });
        }

        if d.active_port == Some(port) {
            d.save_port |= persist;
            return Ok(());
        }

        let from = d.active_port.replace(port);
        d.save_port = persist;
        tracing::debug!("{} {}: active port is now {}", d.kind, d.name, port);
        self.changes.push(ModelChange::ActivePortChanged {
            device,
            from,
            to: port,
            persist,
        });
        Ok(())
    }

    /// Record a hardware availability report. Returns whether the value changed.
    pub fn set_port_available(&mut self, port: PortId, available: Availability) -> Result<bool> {
        let p = self
            .ports
            .get_mut(port.index())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownPort(port))?;

        if p.available == available {
            return Ok(false);
        }

        let from = std::mem::replace(&mut p.available, available);
        tracing::debug!("Port {} availability: {} -> {}", p.name, from, available);
        self.changes.push(ModelChange::PortAvailabilityChanged {
            port,
            from,
            to: available,
        });
        Ok(true)
    }

    fn remove_devices(&mut self, card: CardId) {
        let (sinks, sources) = match self.card_mut(card) {
            Some(c) => (std::mem::take(&mut c.sinks), std::mem::take(&mut c.sources)),
            None => return,
        };
        for device in sinks.into_iter().chain(sources) {
            if let Some(slot) = self.devices.get_mut(device.index()) {
                *slot = None;
            }
            self.changes.push(ModelChange::DeviceRemoved {
                card: Some(card),
                device,
            });
        }
    }

    /// Destroy a card with its ports, profiles and devices.
    pub fn remove_card(&mut self, card: CardId) -> Result<()> {
        if self.card(card).is_none() {
            return Err(Error::UnknownCard(card));
        }
        self.remove_devices(card);

        let Some(c) = self.cards.get_mut(card.index()).and_then(Option::take) else {
            return Err(Error::UnknownCard(card));
        };
        for port in &c.ports {
            if let Some(slot) = self.ports.get_mut(port.index()) {
                *slot = None;
            }
        }
        for profile in &c.profiles {
            if let Some(slot) = self.profiles.get_mut(profile.index()) {
                *slot = None;
            }
        }
        self.backends.remove(&card);

        tracing::debug!("Removed card {}: {}", card, c.name);
        self.changes.push(ModelChange::CardRemoved { card });
        Ok(())
    }

    // ==================== Journal ====================

    pub fn changes(&self) -> &[ModelChange] {
        &self.changes
    }

    pub fn take_changes(&mut self) -> Vec<ModelChange> {
        std::mem::take(&mut self.changes)
    }
}

impl std::fmt::Debug for Core {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Core")
            .field("num_cards", &self.cards().count())
            .field("num_ports", &self.ports.iter().flatten().count())
            .field("num_devices", &self.devices.iter().flatten().count())
            .field("num_backends", &self.backends.len())
            .field("pending_changes", &self.changes.len())
            .finish()
    }
}
