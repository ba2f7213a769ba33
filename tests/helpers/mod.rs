//! Test helpers and fixtures for autoroute integration tests
//!
//! Fixtures build cards the way a sound-card driver would announce them:
//! ports with priorities and initial availability, profiles with sink and
//! source layouts. Nothing here talks to real hardware.
#![allow(dead_code)]

use autoroute::prelude::*;
use autoroute::{DeviceId, ModelChange};

/// Install a test-friendly tracing subscriber. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Create a route system with default configuration on an empty host.
pub fn test_system() -> RouteSystem {
    init_tracing();
    RouteSystem::builder()
        .build()
        .expect("Failed to create test system")
}

/// Analog card with an alternative HDMI profile.
///
/// `analog` (priority 1) drives the speaker, `hdmi` (priority 2) drives the
/// HDMI port. Both keep the same stereo microphone, so either direction
/// guard lets a switch through.
pub fn hdmi_card(speaker: Availability) -> CardNewData {
    CardNewData::new("pci-hda")
        .with_port(
            Port::output("analog-output-speaker")
                .with_priority(100)
                .with_available(speaker),
        )
        .with_port(Port::output("hdmi-output-0").with_priority(50))
        .with_port(Port::input("analog-input-mic").with_priority(100))
        .with_profile(
            Profile::new("output:analog-stereo+input:analog-stereo")
                .with_priority(1)
                .with_sink("analog-stereo", ["analog-output-speaker"], 2)
                .with_source("analog-stereo-input", ["analog-input-mic"], 2),
        )
        .with_profile(
            Profile::new("output:hdmi-stereo+input:analog-stereo")
                .with_priority(2)
                .with_sink("hdmi-stereo", ["hdmi-output-0"], 2)
                .with_source("analog-stereo-input", ["analog-input-mic"], 2),
        )
        .with_active_profile("output:analog-stereo+input:analog-stereo")
}

/// Laptop codec: speaker and headphone jack on one sink, internal and
/// headset microphone on one source. Both jacks start unplugged.
pub fn laptop_card() -> CardNewData {
    CardNewData::new("laptop")
        .with_port(Port::output("analog-output-speaker").with_priority(10000))
        .with_port(
            Port::output("analog-output-headphones")
                .with_priority(9900)
                .with_available(Availability::No),
        )
        .with_port(Port::input("analog-input-internal-mic").with_priority(8900))
        .with_port(
            Port::input("analog-input-headset-mic")
                .with_priority(8800)
                .with_available(Availability::No),
        )
        .with_profile(
            Profile::new("output:analog-stereo+input:analog-stereo")
                .with_priority(6565)
                .with_sink(
                    "analog-stereo",
                    ["analog-output-speaker", "analog-output-headphones"],
                    2,
                )
                .with_source(
                    "analog-stereo-input",
                    ["analog-input-internal-mic", "analog-input-headset-mic"],
                    2,
                ),
        )
        .with_profile(
            Profile::new("output:analog-stereo")
                .with_priority(6500)
                .with_sink(
                    "analog-stereo",
                    ["analog-output-speaker", "analog-output-headphones"],
                    2,
                ),
        )
}

/// Card whose jacks outrank the built-in speaker and microphone, with both
/// jacks reported unplugged.
pub fn jack_card() -> CardNewData {
    CardNewData::new("usb-audio")
        .with_port(
            Port::output("headphones")
                .with_priority(200)
                .with_available(Availability::No),
        )
        .with_port(Port::output("speaker").with_priority(100))
        .with_port(
            Port::input("headset-mic")
                .with_priority(200)
                .with_available(Availability::No),
        )
        .with_port(Port::input("internal-mic").with_priority(100))
        .with_profile(
            Profile::new("analog-duplex")
                .with_sink("analog-out", ["headphones", "speaker"], 2)
                .with_source("analog-in", ["headset-mic", "internal-mic"], 2),
        )
}

/// Bluetooth headset: high quality playback only, or mono duplex.
pub fn headset_card() -> CardNewData {
    CardNewData::new("bluez-headset")
        .with_port(Port::output("headset-output").with_priority(0))
        .with_port(
            Port::input("headset-input")
                .with_priority(0)
                .with_available(Availability::No),
        )
        .with_profile(
            Profile::new("a2dp-sink")
                .with_priority(40)
                .with_sink("a2dp", ["headset-output"], 2),
        )
        .with_profile(
            Profile::new("headset-head-unit")
                .with_priority(30)
                .with_sink("hsp-out", ["headset-output"], 1)
                .with_source("hsp-in", ["headset-input"], 1),
        )
}

pub fn port(core: &Core, card: CardId, name: &str) -> PortId {
    core.find_port(card, name)
        .unwrap_or_else(|| panic!("card has no port {name}"))
}

pub fn active_profile_name(core: &Core, card: CardId) -> String {
    core.active_profile(card)
        .map(|(_, profile)| profile.name.clone())
        .expect("card has an active profile")
}

/// Name of the active port of the card's first sink or source.
pub fn active_port_name(core: &Core, card: CardId, kind: DeviceKind) -> Option<String> {
    let (_, device) = core.card_devices(card, kind).next()?;
    let port = device.active_port()?;
    core.port(port).map(|port| port.name.clone())
}

/// Every device with its active port name, in host order.
pub fn selection(core: &Core) -> Vec<(String, Option<String>)> {
    core.cards()
        .flat_map(move |(card, _)| {
            core.card_devices(card, DeviceKind::Sink)
                .chain(core.card_devices(card, DeviceKind::Source))
        })
        .map(|(_, device)| {
            let port = device
                .active_port()
                .and_then(|port| core.port(port))
                .map(|port| port.name.clone());
            (device.name().to_string(), port)
        })
        .collect()
}

/// Selection changes recorded in the host journal since it was last drained.
pub fn drain_selection_changes(core: &mut Core) -> Vec<ModelChange> {
    core.take_changes()
        .into_iter()
        .filter(ModelChange::is_selection_change)
        .collect()
}

pub fn first_device(core: &Core, card: CardId, kind: DeviceKind) -> DeviceId {
    core.card_devices(card, kind)
        .next()
        .map(|(id, _)| id)
        .expect("card has a device of this kind")
}
