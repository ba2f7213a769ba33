//! The controller next to other listeners, and the `*_new` corrections.

use crate::helpers::*;
use autoroute::prelude::*;
use autoroute::{Card, DeviceNewData, Error, Hook, ModelChange};
use std::cell::RefCell;
use std::rc::Rc;

/// Records the active sink port of the event's card each time it runs. When
/// `restore` is set it first selects that port, like a saved-route restore.
struct Observer {
    priority: HookPriority,
    restore: Option<&'static str>,
    seen: Rc<RefCell<Vec<Option<String>>>>,
    result: HookResult,
}

impl Observer {
    fn new(priority: HookPriority, seen: &Rc<RefCell<Vec<Option<String>>>>) -> Self {
        Self {
            priority,
            restore: None,
            seen: Rc::clone(seen),
            result: HookResult::Ok,
        }
    }
}

impl HookListener for Observer {
    fn priority(&self, hook: Hook) -> Option<HookPriority> {
        match hook {
            Hook::PortAvailableChanged => Some(self.priority),
            Hook::CardNew | Hook::SinkNew | Hook::SourceNew => None,
        }
    }

    fn port_available_changed(&mut self, core: &mut Core, changed: PortId) -> HookResult {
        let Some(card) = core.port(changed).and_then(|p| p.card()) else {
            return self.result;
        };
        if let Some(name) = self.restore {
            let sink = first_device(core, card, DeviceKind::Sink);
            let saved = port(core, card, name);
            core.set_active_port(sink, saved, true).unwrap();
        }
        self.seen
            .borrow_mut()
            .push(active_port_name(core, card, DeviceKind::Sink));
        self.result
    }
}

/// Saved-route restore at `Normal` runs first; the controller at `Late`
/// overrides it with the newly plugged jack.
#[test]
fn test_controller_runs_after_restore() {
    let mut system = test_system();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut restore = Observer::new(HookPriority::Normal, &seen);
    restore.restore = Some("analog-output-speaker");
    system.connect(restore);
    system.connect(Observer::new(HookPriority::Late, &seen));

    let card = system.put_card(laptop_card()).unwrap();
    let headphones = port(system.core(), card, "analog-output-headphones");
    system.set_port_available(headphones, Availability::Yes).unwrap();

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            Some("analog-output-speaker".to_string()),
            Some("analog-output-headphones".to_string()),
        ]
    );

    // The automatic choice is not persisted.
    let sink = first_device(system.core(), card, DeviceKind::Sink);
    assert!(!system.core().device(sink).unwrap().save_port());
}

/// An earlier listener can end dispatch before the controller sees the event.
#[test]
fn test_stop_from_earlier_listener_skips_controller() {
    let mut system = test_system();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut gate = Observer::new(HookPriority::Early, &seen);
    gate.result = HookResult::Stop;
    system.connect(gate);

    let card = system.put_card(laptop_card()).unwrap();
    let headphones = port(system.core(), card, "analog-output-headphones");
    system.set_port_available(headphones, Availability::Yes).unwrap();

    assert_eq!(
        active_port_name(system.core(), card, DeviceKind::Sink).as_deref(),
        Some("analog-output-speaker")
    );
    assert_eq!(system.stats().events, 0);
}

/// A refused profile commit leaves the card as it was.
#[test]
fn test_rejected_profile_commit_changes_nothing() {
    let mut system = test_system();
    let card = system.put_card(hdmi_card(Availability::No)).unwrap();
    system
        .core_mut()
        .set_backend(
            card,
            |_: &Card, profile: &Profile| -> std::result::Result<(), String> {
                Err(format!("{} is busy", profile.name))
            },
        )
        .unwrap();
    drain_selection_changes(system.core_mut());

    let hdmi = port(system.core(), card, "hdmi-output-0");
    system.set_port_available(hdmi, Availability::Yes).unwrap();

    assert_eq!(
        active_profile_name(system.core(), card),
        "output:analog-stereo+input:analog-stereo"
    );
    assert!(drain_selection_changes(system.core_mut()).is_empty());
    assert_eq!(system.stats().errors, 1);
    assert_eq!(system.stats().profile_switches, 0);
}

fn usb_card() -> CardNewData {
    CardNewData::new("usb")
        .with_port(
            Port::output("analog-output-line")
                .with_priority(10)
                .with_available(Availability::No),
        )
        .with_port(Port::output("iec958-stereo-output").with_priority(5))
        .with_profile(
            Profile::new("output:analog-stereo")
                .with_priority(10)
                .with_sink("analog-stereo", ["analog-output-line"], 2),
        )
        .with_profile(
            Profile::new("output:iec958-stereo")
                .with_priority(5)
                .with_sink("iec958-stereo", ["iec958-stereo-output"], 2),
        )
}

/// A saved profile whose only port is unplugged is replaced, and the
/// replacement is not saved.
#[test]
fn test_card_new_skips_profile_without_available_ports() {
    let mut system = test_system();
    let card = system
        .put_card(usb_card().with_saved_profile("output:analog-stereo"))
        .unwrap();

    assert_eq!(
        active_profile_name(system.core(), card),
        "output:iec958-stereo"
    );
    assert!(!system.core().card(card).unwrap().save_profile());
    assert_eq!(system.stats().profile_corrections, 1);
}

/// When no profile has a usable port the proposal is kept.
#[test]
fn test_card_new_keeps_proposal_without_alternative() {
    let mut system = test_system();
    let mut data = usb_card().with_saved_profile("output:analog-stereo");
    for port in &mut data.ports {
        port.available = Availability::No;
    }

    let card = system.put_card(data).unwrap();
    assert_eq!(
        active_profile_name(system.core(), card),
        "output:analog-stereo"
    );
    assert!(system.core().card(card).unwrap().save_profile());
}

/// New sinks and sources start on a usable port when their default is
/// unplugged, and keep their default otherwise.
#[test]
fn test_initial_ports_avoid_unplugged_jacks() {
    let mut system = test_system();
    let jacks = system.put_card(jack_card()).unwrap();
    assert_eq!(
        active_port_name(system.core(), jacks, DeviceKind::Sink).as_deref(),
        Some("speaker")
    );
    assert_eq!(
        active_port_name(system.core(), jacks, DeviceKind::Source).as_deref(),
        Some("internal-mic")
    );
    assert_eq!(system.stats().port_overrides, 2);

    let laptop = system.put_card(laptop_card()).unwrap();
    assert_eq!(
        active_port_name(system.core(), laptop, DeviceKind::Sink).as_deref(),
        Some("analog-output-speaker")
    );
    assert_eq!(system.stats().port_overrides, 2);
}

/// A port suggested by an earlier listener is only overridden when unplugged.
#[test]
fn test_suggested_initial_port_is_respected_when_usable() {
    struct Suggest(&'static str);

    impl HookListener for Suggest {
        fn priority(&self, hook: Hook) -> Option<HookPriority> {
            match hook {
                Hook::SinkNew => Some(HookPriority::Early),
                Hook::CardNew | Hook::SourceNew | Hook::PortAvailableChanged => None,
            }
        }

        fn sink_new(&mut self, _core: &Core, data: &mut DeviceNewData) -> HookResult {
            data.set_port(self.0);
            HookResult::Ok
        }
    }

    let mut system = test_system();
    system.connect(Suggest("analog-output-speaker"));
    let card = system.put_card(laptop_card()).unwrap();
    assert_eq!(
        active_port_name(system.core(), card, DeviceKind::Sink).as_deref(),
        Some("analog-output-speaker")
    );

    let mut system = test_system();
    system.connect(Suggest("analog-output-headphones"));
    let card = system.put_card(laptop_card()).unwrap();
    assert_eq!(
        active_port_name(system.core(), card, DeviceKind::Sink).as_deref(),
        Some("analog-output-speaker")
    );
}

/// Cancelling a card in another listener is reported through the umbrella error.
#[test]
fn test_cancelled_card_surfaces_model_error() {
    struct Veto;

    impl HookListener for Veto {
        fn priority(&self, hook: Hook) -> Option<HookPriority> {
            match hook {
                Hook::CardNew => Some(HookPriority::Early),
                Hook::SinkNew | Hook::SourceNew | Hook::PortAvailableChanged => None,
            }
        }

        fn card_new(&mut self, _core: &Core, _data: &mut CardNewData) -> HookResult {
            HookResult::Cancel
        }
    }

    let mut system = test_system();
    system.connect(Veto);
    let err = system.put_card(laptop_card()).unwrap_err();
    assert!(matches!(
        err,
        Error::Model(autoroute::model::Error::Cancelled(ref name)) if name == "laptop"
    ));
    assert!(!system
        .core()
        .changes()
        .iter()
        .any(|change| matches!(change, ModelChange::CardAdded { .. })));
}
