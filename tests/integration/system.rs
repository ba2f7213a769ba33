//! RouteSystem lifecycle: builder settings, validation, stats, detach.

use crate::helpers::*;
use autoroute::prelude::*;
use autoroute::{Error, ModelChange};

#[test]
fn test_builder_applies_settings() {
    init_tracing();
    let system = RouteSystem::builder()
        .tie_break(TieBreak::LexicalName)
        .reconcile_on_attach(false)
        .new_object_priority(HookPriority::Early)
        .build()
        .unwrap();

    let config = system.config();
    assert_eq!(config.tie_break, TieBreak::LexicalName);
    assert!(!config.reconcile_on_attach);
    assert_eq!(config.new_object_priority, HookPriority::Early);
    assert_eq!(config.port_available_priority, HookPriority::Late);
    assert_eq!(system.server().listener_count(), 1);
}

/// The availability hook must run after saved-route restore.
#[test]
fn test_builder_rejects_early_availability_hook() {
    let result = RouteSystem::builder()
        .port_available_priority(HookPriority::Normal)
        .build();
    assert!(matches!(
        result,
        Err(Error::Switch(autoroute::switch::Error::InvalidConfig(_)))
    ));
}

#[test]
fn test_config_from_json() {
    let config: SwitchConfig = serde_json::from_str(
        r#"{ "tie_break": "lexical_name", "port_available_priority": "late" }"#,
    )
    .unwrap();
    let system = RouteSystem::builder().config(config.clone()).build().unwrap();
    assert_eq!(system.config(), &config);
    assert!(system.config().reconcile_on_attach);
}

#[test]
fn test_named_port_lookup() {
    let mut system = test_system();
    let card = system.put_card(laptop_card()).unwrap();

    assert!(system
        .set_named_port_available(card, "analog-output-headphones", Availability::Yes)
        .unwrap());
    assert_eq!(
        active_port_name(system.core(), card, DeviceKind::Sink).as_deref(),
        Some("analog-output-headphones")
    );

    let err = system
        .set_named_port_available(card, "hdmi-output-0", Availability::Yes)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Model(autoroute::model::Error::PortNotFound { .. })
    ));
}

/// Redundant reports are absorbed: the value does not change, nothing fires.
#[test]
fn test_repeated_report_is_absorbed() {
    let mut system = test_system();
    let card = system.put_card(laptop_card()).unwrap();
    let headphones = port(system.core(), card, "analog-output-headphones");

    assert!(system.set_port_available(headphones, Availability::Yes).unwrap());
    assert!(!system.set_port_available(headphones, Availability::Yes).unwrap());
    assert_eq!(system.stats().events, 1);

    system.server_mut().notify_port_available(headphones);
    assert_eq!(system.stats().events, 2);
    assert_eq!(system.stats().ignored, 1);
}

#[test]
fn test_stats_snapshot_serializes() {
    let mut system = test_system();
    let card = system.put_card(hdmi_card(Availability::No)).unwrap();
    let hdmi = port(system.core(), card, "hdmi-output-0");
    system.set_port_available(hdmi, Availability::Yes).unwrap();

    let handle = system.stats_handle();
    let json = serde_json::to_value(handle.snapshot()).unwrap();
    assert_eq!(json["events"], 1);
    assert_eq!(json["profile_switches"], 1);
}

#[test]
fn test_journal_serializes() {
    let mut system = test_system();
    let card = system.put_card(laptop_card()).unwrap();
    let headphones = port(system.core(), card, "analog-output-headphones");
    system.core_mut().take_changes();

    system.set_port_available(headphones, Availability::Yes).unwrap();
    let changes = system.core_mut().take_changes();
    assert!(matches!(
        changes.as_slice(),
        [
            ModelChange::PortAvailabilityChanged { .. },
            ModelChange::ActivePortChanged { persist: false, .. },
        ]
    ));

    let json = serde_json::to_value(&changes[0]).unwrap();
    assert_eq!(json["kind"], "port_availability_changed");
    assert_eq!(json["to"], "yes");
}

#[test]
fn test_detach_stops_switching() {
    let mut system = test_system();
    let card = system.put_card(laptop_card()).unwrap();
    let headphones = port(system.core(), card, "analog-output-headphones");

    let mut server = system.detach();
    assert_eq!(server.listener_count(), 0);

    server.set_port_available(headphones, Availability::Yes).unwrap();
    assert_eq!(
        active_port_name(server.core(), card, DeviceKind::Sink).as_deref(),
        Some("analog-output-speaker")
    );
}
