//! Builder for configuring and constructing a `RouteSystem`.

use crate::switch::{attach, SwitchConfig, TieBreak};
use crate::{Result, RouteSystem};
use autoroute_model::{HookPriority, Server};

/// Settings mirror [`SwitchConfig`] and are validated on [`build`](Self::build).
///
/// # Example
///
/// ```ignore
/// use autoroute::prelude::*;
///
/// let mut system = RouteSystem::builder()
///     .tie_break(TieBreak::LexicalName)
///     .build()?;
///
/// let card = system.put_card(card_new_data)?;
/// ```
#[derive(Debug, Default)]
pub struct RouteSystemBuilder {
    server: Option<Server>,
    config: SwitchConfig,
}

impl RouteSystemBuilder {
    /// Attach to an existing host instead of an empty one. Its unavailable
    /// ports are reconciled on build unless disabled.
    pub fn server(mut self, server: Server) -> Self {
        self.server = Some(server);
        self
    }

    /// Replace every setting at once.
    pub fn config(mut self, config: SwitchConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: `DeclarationOrder`
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Default: true
    pub fn reconcile_on_attach(mut self, enabled: bool) -> Self {
        self.config.reconcile_on_attach = enabled;
        self
    }

    /// Default: `Normal`
    pub fn new_object_priority(mut self, priority: HookPriority) -> Self {
        self.config.new_object_priority = priority;
        self
    }

    /// Default: `Late`
    pub fn port_available_priority(mut self, priority: HookPriority) -> Self {
        self.config.port_available_priority = priority;
        self
    }

    pub fn build(self) -> Result<RouteSystem> {
        let mut server = self.server.unwrap_or_default();
        let attachment = attach(&mut server, self.config.clone())?;
        Ok(RouteSystem::from_parts(server, self.config, attachment))
    }
}
