//! Direction-preservation checks for profile candidates.
//!
//! A profile switch triggered by one direction must leave the other direction
//! as it is: same number of devices, same channel count.

use autoroute_model::{Availability, Card, Core, Direction, Profile};

/// Whether switching to `candidate` for an output port keeps capture intact
/// and does not abandon a sink whose current port is still usable.
pub fn good_for_output(core: &Core, card: &Card, candidate: &Profile, active: &Profile) -> bool {
    if candidate.n_sources != active.n_sources {
        return false;
    }

    if candidate.max_source_channels != active.max_source_channels {
        return false;
    }

    // Don't move from analog to HDMI just because HDMI became available.
    card.sinks()
        .iter()
        .filter_map(|&sink| core.device(sink))
        .filter_map(|sink| sink.active_port())
        .filter_map(|port| core.port(port))
        .all(|port| match port.available {
            Availability::No => true,
            Availability::Yes | Availability::Unknown => false,
        })
}

/// Whether switching to `candidate` for an input port keeps playback intact.
pub fn good_for_input(candidate: &Profile, active: &Profile) -> bool {
    candidate.n_sinks == active.n_sinks && candidate.max_sink_channels == active.max_sink_channels
}

pub fn good_for(
    direction: Direction,
    core: &Core,
    card: &Card,
    candidate: &Profile,
    active: &Profile,
) -> bool {
    match direction {
        Direction::Output => good_for_output(core, card, candidate, active),
        Direction::Input => good_for_input(candidate, active),
    }
}
