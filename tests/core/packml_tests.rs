//! Tests for the PackML state machine generator
//!
//! Tests cover:
//! - Transition table shape
//! - Guard priority in the rendered code
//! - Command clearing
//! - Dialect quoting and comment styles

use plcudt::packml::{self, Guard, PackMlCommand, PackMlState, SUBSTATE_COMPLETE};
use plcudt::vendors::VendorKind;
use strum::IntoEnumIterator;

fn render(vendor: VendorKind, instance: &str) -> String {
    vendor
        .adapter()
        .generate_state_machine(instance)
        .expect("every vendor renders the state machine")
}

/// Section of rendered code between `  <code>: (* NAME *)` and the next state
fn state_block(code: &str, state: PackMlState) -> &str {
    let header = format!("  {}: (* {} *)", state.code(), state);
    let start = code.find(&header).unwrap_or_else(|| panic!("missing {}", header));
    let rest = &code[start..];
    let end = rest.find("END_IF;").expect("state block closes") + "END_IF;".len();
    &rest[..end]
}

// ============================================
// Transition Table Tests
// ============================================

#[test]
fn test_table_targets() {
    let expect = [
        (PackMlState::Stopped, vec![PackMlState::Idle]),
        (PackMlState::Idle, vec![PackMlState::Starting]),
        (PackMlState::Starting, vec![PackMlState::Execute]),
        (
            PackMlState::Execute,
            vec![PackMlState::Holding, PackMlState::Stopping, PackMlState::Aborting],
        ),
        (PackMlState::Holding, vec![PackMlState::Held]),
        (PackMlState::Held, vec![PackMlState::Unholding]),
        (PackMlState::Stopping, vec![PackMlState::Stopped]),
        (PackMlState::Aborting, vec![PackMlState::Aborted]),
        (PackMlState::Aborted, vec![PackMlState::Stopped]),
        (PackMlState::Unholding, vec![PackMlState::Execute]),
    ];
    for (from, targets) in expect {
        let actual: Vec<PackMlState> = packml::transitions_from(from).map(|t| t.to).collect();
        assert_eq!(actual, targets, "transitions from {}", from);
    }
}

#[test]
fn test_acting_states_wait_for_substate() {
    for state in [
        PackMlState::Starting,
        PackMlState::Holding,
        PackMlState::Stopping,
        PackMlState::Aborting,
        PackMlState::Unholding,
    ] {
        let guards: Vec<Guard> = packml::transitions_from(state).map(|t| t.guard).collect();
        assert_eq!(guards, vec![Guard::SubStateComplete], "{}", state);
    }
    assert_eq!(SUBSTATE_COMPLETE, 100);
}

#[test]
fn test_every_target_is_a_known_state() {
    for transition in packml::transitions() {
        assert!(PackMlState::from_code(transition.to.code()).is_some());
    }
}

// ============================================
// Rendering Tests
// ============================================

#[test]
fn test_execute_priority_in_every_dialect() {
    for vendor in VendorKind::iter() {
        let code = render(vendor, "U1");
        let p = if vendor == VendorKind::Siemens { "\"U1\"" } else { "U1" };
        let block = state_block(&code, PackMlState::Execute);

        let hold = block.find(&format!("IF {}.Command.Hold THEN", p)).unwrap();
        let stop = block.find(&format!("ELSIF {}.Command.Stop THEN", p)).unwrap();
        let abort = block.find(&format!("ELSIF {}.Command.Abort THEN", p)).unwrap();
        assert!(hold < stop && stop < abort, "{} orders EXECUTE guards wrongly", vendor);
    }
}

#[test]
fn test_commands_cleared_after_case_in_every_dialect() {
    for vendor in VendorKind::iter() {
        let code = render(vendor, "U1");
        let end_case = code.find("END_CASE;").unwrap();
        let p = if vendor == VendorKind::Siemens { "\"U1\"" } else { "U1" };
        for command in PackMlCommand::iter() {
            let clear = format!("{}.Command.{} := FALSE;", p, command);
            let pos = code.find(&clear).unwrap_or_else(|| panic!("{}: missing {}", vendor, clear));
            assert!(pos > end_case);
        }
    }
}

#[test]
fn test_transition_assignments() {
    let code = render(VendorKind::Rockwell, "Tank");
    let block = state_block(&code, PackMlState::Aborted);
    assert_eq!(
        block,
        "  9: (* ABORTED *)\n    IF Tank.Command.Clear THEN\n      Tank.Status.State := 0; (* STOPPED *)\n      Tank.Status.StateName := 'STOPPED';\n      Tank.Status.SubState := 0;\n    END_IF;"
    );
}

#[test]
fn test_substate_guard_rendering() {
    let code = render(VendorKind::Codesys, "Tank");
    let block = state_block(&code, PackMlState::Unholding);
    assert!(block.contains("IF Tank.Status.SubState = 100 THEN"));
    assert!(block.contains("Tank.Status.State := 3; (* EXECUTE *)"));
}

#[test]
fn test_instance_interpolated_verbatim() {
    let code = render(VendorKind::Rockwell, "Line1.Filler");
    assert!(code.contains("CASE Line1.Filler.Status.State OF"));
    assert!(code.contains("Line1.Filler.Command.Reset := FALSE;"));
}

#[test]
fn test_all_states_rendered_once() {
    let code = render(VendorKind::Beckhoff, "U");
    for state in PackMlState::iter() {
        let header = format!("  {}: (* {} *)", state.code(), state);
        assert_eq!(code.matches(&header).count(), 1, "{}", header);
    }
}
