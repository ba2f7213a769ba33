//! In-memory host: the model arena plus listener dispatch.
//!
//! ```ignore
//! let mut server = Server::new();
//! server.connect(MyListener::default());
//!
//! let card = server.put_card(card_new_data)?;
//! let port = server.core().find_port(card, "analog-output-headphones").unwrap();
//! server.set_port_available(port, Availability::Yes)?;
//! ```

use crate::arena::Core;
use crate::error::{Error, Result};
use crate::hooks::{Hook, HookListener, HookResult};
use crate::proposal::{CardNewData, DeviceNewData};
use crate::types::{Availability, CardId, DeviceId, DeviceKind, PortId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

struct Slot {
    id: ListenerId,
    listener: Box<dyn HookListener>,
}

/// Owns the [`Core`] and dispatches hooks to connected listeners.
///
/// Dispatch is synchronous on the caller's thread. Mutations a listener makes
/// while handling an event do not dispatch further hooks.
#[derive(Default)]
pub struct Server {
    core: Core,
    listeners: Vec<Slot>,
    next_id: u32,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_core(core: Core) -> Self {
        Self {
            core,
            ..Self::default()
        }
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    pub fn connect(&mut self, listener: impl HookListener + 'static) -> ListenerId {
        self.connect_boxed(Box::new(listener))
    }

    pub fn connect_boxed(&mut self, listener: Box<dyn HookListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Slot { id, listener });
        id
    }

    pub fn disconnect(&mut self, id: ListenerId) -> Option<Box<dyn HookListener>> {
        let index = self.listeners.iter().position(|slot| slot.id == id)?;
        Some(self.listeners.remove(index).listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listener indices subscribed to `hook`, in dispatch order.
    fn dispatch_order(&self, hook: Hook) -> Vec<usize> {
        let mut order: Vec<_> = self
            .listeners
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.listener.priority(hook).map(|p| (p, i)))
            .collect();
        // Stable: equal priorities keep registration order.
        order.sort_by_key(|&(priority, _)| priority);
        order.into_iter().map(|(_, i)| i).collect()
    }

    /// Run the `card_new` hooks on `data`, then create the card and the
    /// sinks/sources of its active profile (running their hooks too).
    ///
    /// If any of those devices cannot be created (a `sink_new`/`source_new`
    /// listener returned `Cancel`) the card is removed again.
    pub fn put_card(&mut self, mut data: CardNewData) -> Result<CardId> {
        for i in self.dispatch_order(Hook::CardNew) {
            match self.listeners[i].listener.card_new(&self.core, &mut data) {
                HookResult::Ok => {}
                HookResult::Stop => break,
                HookResult::Cancel => return Err(Error::Cancelled(data.name)),
            }
        }

        let card = self.core.insert_card(data)?;
        for proposal in self.core.device_proposals(card)? {
            if let Err(err) = self.put_device(proposal) {
                tracing::debug!("Card {}: device creation failed, removing card: {}", card, err);
                self.core.remove_card(card)?;
                return Err(err);
            }
        }
        Ok(card)
    }

    /// Run the `sink_new` or `source_new` hooks on `data` and create the device.
    /// `Cancel` only drops this device.
    pub fn put_device(&mut self, mut data: DeviceNewData) -> Result<DeviceId> {
        let hook = match data.kind {
            DeviceKind::Sink => Hook::SinkNew,
            DeviceKind::Source => Hook::SourceNew,
        };

        for i in self.dispatch_order(hook) {
            let listener = &mut self.listeners[i].listener;
            let result = match data.kind {
                DeviceKind::Sink => listener.sink_new(&self.core, &mut data),
                DeviceKind::Source => listener.source_new(&self.core, &mut data),
            };
            match result {
                HookResult::Ok => {}
                HookResult::Stop => break,
                HookResult::Cancel => return Err(Error::Cancelled(data.name)),
            }
        }

        self.core.insert_device(data)
    }

    pub fn remove_card(&mut self, card: CardId) -> Result<()> {
        self.core.remove_card(card)
    }

    /// Record a hardware availability report and, if the value changed,
    /// dispatch `port_available_changed`. Returns whether it changed.
    pub fn set_port_available(&mut self, port: PortId, available: Availability) -> Result<bool> {
        let changed = self.core.set_port_available(port, available)?;
        if changed {
            self.notify_port_available(port);
        }
        Ok(changed)
    }

    /// Dispatch `port_available_changed` for `port` unconditionally.
    pub fn notify_port_available(&mut self, port: PortId) {
        for i in self.dispatch_order(Hook::PortAvailableChanged) {
            let result = self.listeners[i]
                .listener
                .port_available_changed(&mut self.core, port);
            if result != HookResult::Ok {
                break;
            }
        }
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("core", &self.core)
            .field("num_listeners", &self.listeners.len())
            .finish()
    }
}
