//! RouteSystem: a host with the route controller attached.

use crate::switch::{Attachment, Reconciled, StatsHandle, StatsSnapshot, SwitchConfig};
use crate::{Result, RouteSystemBuilder};
use autoroute_model::{
    Availability, CardId, CardNewData, Core, HookListener, ListenerId, PortId, Server,
};

/// Owns a [`Server`] with a connected [`RouteController`](crate::switch::RouteController).
///
/// Other listeners (for example one restoring saved routes) can be connected
/// alongside it; dispatch order follows their hook priorities.
///
/// # Example
///
/// ```ignore
/// use autoroute::prelude::*;
///
/// let mut system = RouteSystem::builder().build()?;
/// let card = system.put_card(card_new_data)?;
///
/// let headphones = system.core().find_port(card, "analog-output-headphones").unwrap();
/// system.set_port_available(headphones, Availability::Yes)?;
/// ```
#[derive(Debug)]
pub struct RouteSystem {
    server: Server,
    config: SwitchConfig,
    controller: ListenerId,
    stats: StatsHandle,
    reconciled: Vec<Reconciled>,
}

impl RouteSystem {
    pub fn builder() -> RouteSystemBuilder {
        RouteSystemBuilder::default()
    }

    pub(crate) fn from_parts(server: Server, config: SwitchConfig, attachment: Attachment) -> Self {
        Self {
            server,
            config,
            controller: attachment.listener,
            stats: attachment.stats,
            reconciled: attachment.reconciled,
        }
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut Server {
        &mut self.server
    }

    pub fn core(&self) -> &Core {
        self.server.core()
    }

    pub fn core_mut(&mut self) -> &mut Core {
        self.server.core_mut()
    }

    /// Connect another listener next to the controller.
    pub fn connect(&mut self, listener: impl HookListener + 'static) -> ListenerId {
        self.server.connect(listener)
    }

    pub fn put_card(&mut self, data: CardNewData) -> Result<CardId> {
        Ok(self.server.put_card(data)?)
    }

    pub fn remove_card(&mut self, card: CardId) -> Result<()> {
        Ok(self.server.remove_card(card)?)
    }

    /// Report a port availability change. Returns whether the value changed.
    pub fn set_port_available(&mut self, port: PortId, available: Availability) -> Result<bool> {
        Ok(self.server.set_port_available(port, available)?)
    }

    /// Look a port up by name on `card` and report its availability.
    pub fn set_named_port_available(
        &mut self,
        card: CardId,
        port: &str,
        available: Availability,
    ) -> Result<bool> {
        let id = self
            .core()
            .find_port(card, port)
            .ok_or_else(|| autoroute_model::Error::PortNotFound {
                card,
                port: port.to_string(),
            })?;
        self.set_port_available(id, available)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn stats_handle(&self) -> StatsHandle {
        self.stats.clone()
    }

    /// Results of the startup replay.
    pub fn reconciled(&self) -> &[Reconciled] {
        &self.reconciled
    }

    /// Disconnect the controller and hand the host back.
    pub fn detach(mut self) -> Server {
        if self.server.disconnect(self.controller).is_some() {
            tracing::debug!("Route controller detached");
        }
        self.server
    }
}
