//! Startup reconciliation.
//!
//! A controller attached to a running host has missed every availability
//! event so far. Replaying the ports that are known to be unavailable moves
//! devices off unplugged ports the same way a live unplug would.

use crate::config::SwitchConfig;
use crate::controller::{Outcome, RouteController};
use crate::error::{Result, SwitchError};
use crate::stats::StatsHandle;
use autoroute_model::{Availability, Core, ListenerId, PortId, Server};

/// Result of replaying one port.
pub type Reconciled = (PortId, std::result::Result<Outcome, SwitchError>);

/// Replay the availability handler for every port reporting `No`, cards in
/// host order and ports in card order.
pub fn reconcile(controller: &RouteController, core: &mut Core) -> Vec<Reconciled> {
    let shared: &Core = core;
    let pending: Vec<PortId> = shared
        .cards()
        .flat_map(move |(card, _)| shared.card_ports(card))
        .filter(|(_, port)| match port.available {
            Availability::No => true,
            Availability::Yes | Availability::Unknown => false,
        })
        .map(|(id, _)| id)
        .collect();

    tracing::debug!("Reconciling {} unavailable ports", pending.len());
    pending
        .into_iter()
        .map(|port| (port, controller.on_port_available(core, port)))
        .collect()
}

/// A controller connected to a [`Server`].
#[derive(Debug)]
pub struct Attachment {
    pub listener: ListenerId,
    pub stats: StatsHandle,
    /// Per-port results of the startup replay, empty when disabled.
    pub reconciled: Vec<Reconciled>,
}

/// Build a controller from `config`, reconcile the current host state if
/// enabled, then connect it.
pub fn attach(server: &mut Server, config: SwitchConfig) -> Result<Attachment> {
    let controller = RouteController::new(config)?;
    let stats = controller.stats();

    let reconciled = if controller.config().reconcile_on_attach {
        reconcile(&controller, server.core_mut())
    } else {
        Vec::new()
    };

    let listener = server.connect(controller);
    tracing::debug!("Route controller attached as {:?}", listener);
    Ok(Attachment {
        listener,
        stats,
        reconciled,
    })
}
