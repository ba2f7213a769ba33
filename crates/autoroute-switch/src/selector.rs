//! Profile and port ranking.

use crate::evaluator;
use autoroute_model::{Availability, CardNewData, Core, Port, PortId, Profile, ProfileId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How candidates with equal priority are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first candidate in declaration order wins.
    #[default]
    DeclarationOrder,
    /// The lexicographically smallest name wins.
    LexicalName,
}

impl TieBreak {
    /// Whether `candidate` outranks the current `best`.
    pub fn prefers(self, candidate: (u32, &str), best: (u32, &str)) -> bool {
        match candidate.0.cmp(&best.0) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self {
                TieBreak::DeclarationOrder => false,
                TieBreak::LexicalName => candidate.1 < best.1,
            },
        }
    }
}

trait Ranked {
    fn rank(&self) -> (u32, &str);
}

impl Ranked for Port {
    fn rank(&self) -> (u32, &str) {
        (self.priority, &self.name)
    }
}

impl Ranked for Profile {
    fn rank(&self) -> (u32, &str) {
        (self.priority, &self.name)
    }
}

/// Whether `profile` contains at least one port that is not known to be
/// unavailable. Ports referenced from the profile's device layouts count as
/// members even when their own profile list does not name it.
pub fn profile_contains_available_ports(profile: &Profile, ports: &[Port]) -> bool {
    ports.iter().any(|port| {
        port.available.is_usable()
            && (port.supports(&profile.name)
                || profile.layout_ports().any(|name| name == port.name))
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSelector {
    tie_break: TieBreak,
}

impl ProfileSelector {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn best<'a, K, R>(&self, candidates: impl IntoIterator<Item = (K, &'a R)>) -> Option<(K, &'a R)>
    where
        R: Ranked + 'a,
    {
        let mut best: Option<(K, &'a R)> = None;
        for (key, item) in candidates {
            let replace = match &best {
                None => true,
                Some((_, current)) => self.tie_break.prefers(item.rank(), current.rank()),
            };
            if replace {
                best = Some((key, item));
            }
        }
        best
    }

    /// Highest-ranked profile of the port's card that contains the port and
    /// preserves the opposite direction of the active profile.
    ///
    /// Returns `None` when the port is detached, the card has no active
    /// profile, or no candidate passes the direction guard.
    pub fn select_best_profile(&self, core: &Core, port: PortId) -> Option<ProfileId> {
        let port = core.port(port)?;
        let card_id = port.card()?;
        let card = core.card(card_id)?;
        let (_, active) = core.active_profile(card_id)?;

        tracing::debug!("Finding best profile for port {}", port.name);

        let candidates = core
            .card_profiles(card_id)
            .filter(|(_, profile)| port.supports(&profile.name))
            .filter(|(_, profile)| {
                evaluator::good_for(port.direction, core, card, profile, active)
            });

        self.best(candidates).map(|(id, _)| id)
    }

    /// Highest-ranked profile of a card proposal that is itself usable and
    /// contains at least one usable port.
    pub fn find_best_profile_with_available_ports<'a>(
        &self,
        data: &'a CardNewData,
    ) -> Option<&'a Profile> {
        let candidates = data
            .profiles
            .iter()
            .filter(|profile| profile.available.is_usable())
            .filter(|profile| profile_contains_available_ports(profile, &data.ports))
            .map(|profile| (profile, profile));

        self.best(candidates).map(|(profile, _)| profile)
    }

    /// Best usable port, else the best port overall.
    pub fn find_best_port(&self, core: &Core, ports: &[PortId]) -> Option<PortId> {
        self.find_best_available_port(core, ports)
            .or_else(|| self.best(core.ports_of(ports)).map(|(id, _)| id))
    }

    /// Best port that is not known to be unavailable.
    pub fn find_best_available_port(&self, core: &Core, ports: &[PortId]) -> Option<PortId> {
        let usable = core
            .ports_of(ports)
            .filter(|(_, port)| port.available.is_usable());
        self.best(usable).map(|(id, _)| id)
    }

    /// Override for the initial port of a new sink or source.
    ///
    /// Starts from the preferred port (by name) or, failing that, the
    /// highest-ranked one. Returns `None` when that port may be usable, so the
    /// proposal is left alone; otherwise returns [`find_best_port`].
    ///
    /// [`find_best_port`]: Self::find_best_port
    pub fn pick_initial_port(
        &self,
        core: &Core,
        ports: &[PortId],
        preferred: Option<&str>,
    ) -> Option<PortId> {
        let (_, start) = preferred
            .and_then(|name| core.ports_of(ports).find(|(_, port)| port.name == name))
            .or_else(|| self.best(core.ports_of(ports)))?;

        match start.available {
            Availability::No => self.find_best_port(core, ports),
            Availability::Yes | Availability::Unknown => None,
        }
    }
}
