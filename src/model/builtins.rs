//! Layer 1 base UDTs and the catalogue of built-in types.
//!
//! These are plain factories returning pre-populated definitions; the ISA-88
//! equipment aggregates live in [`super::equipment`].

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use super::equipment;
use super::types::{Literal, TypeDefinition};

use super::types::ScalarKind::{Bool, Int, Lint, Real, String as Str};

/// Universal identifier with namespace support
pub fn identifier() -> TypeDefinition {
    TypeDefinition::new("Identifier", "Universal identifier with namespace support")
        .with_member("Namespace", Str, Some("".into()), "Namespace (e.g., \"ISA-95\", \"OPC-UA\")")
        .with_member("ID", Str, Some("".into()), "Identifier within namespace")
        .with_member("Version", Str, Some("1.0.0".into()), "Semantic version")
}

/// Standard status/state representation
pub fn status() -> TypeDefinition {
    TypeDefinition::new("Status", "Standard status/state representation")
        .with_member("State", Int, Some(Literal::Int(0)), "Current state (PackML state number)")
        .with_member("StateName", Str, Some("STOPPED".into()), "State name")
        .with_member("SubState", Int, Some(Literal::Int(0)), "Sub-state for detailed control")
        .with_member("Mode", Int, Some(Literal::Int(0)), "Operating mode (0=Manual, 1=Auto, 2=Semi)")
        .with_member("Error", Bool, Some(false.into()), "Error present")
        .with_member("ErrorID", Int, Some(Literal::Int(0)), "Error code")
        .with_member("ErrorMessage", Str, Some("".into()), "Error description")
}

/// Standard command interface
pub fn command() -> TypeDefinition {
    let commands = [
        "Reset", "Start", "Stop", "Hold", "Unhold", "Abort", "Clear", "Suspend", "Unsuspend",
    ];
    commands
        .iter()
        .fold(
            TypeDefinition::new("Command", "Standard command interface"),
            |udt, name| udt.with_member(*name, Bool, Some(false.into()), format!("{} command", name)),
        )
}

/// Value with quality and timestamp
pub fn value() -> TypeDefinition {
    TypeDefinition::new("Value", "Value with quality and timestamp")
        .with_member("Val", Real, Some(Literal::Real(0.0)), "Actual value")
        .with_member("Quality", Int, Some(Literal::Int(192)), "OPC quality code (192=Good)")
        .with_member("Timestamp", Lint, Some(Literal::Int(0)), "Unix timestamp (ms)")
        .with_member("Unit", Str, Some("".into()), "Engineering unit")
}

/// Standard alarm representation
pub fn alarm() -> TypeDefinition {
    TypeDefinition::new("Alarm", "Standard alarm representation")
        .with_member("Enabled", Bool, Some(true.into()), "Alarm is enabled")
        .with_member("Active", Bool, Some(false.into()), "Alarm is active")
        .with_member("Acknowledged", Bool, Some(false.into()), "Alarm acknowledged")
        .with_member("Severity", Int, Some(Literal::Int(0)), "Severity (0=Low, 1=Med, 2=High, 3=Critical)")
        .with_member("Timestamp", Lint, Some(Literal::Int(0)), "Activation timestamp")
        .with_member("Message", Str, Some("".into()), "Alarm message")
        .with_member("Source", Str, Some("".into()), "Alarm source")
}

/// Catalogue of built-in types, keyed the way users name them
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, EnumString, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum BuiltinType {
    #[strum(serialize = "identifier")]
    Identifier,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "command")]
    Command,
    #[strum(serialize = "value")]
    Value,
    #[strum(serialize = "alarm")]
    Alarm,
    #[strum(serialize = "equipment")]
    EquipmentModule,
    #[strum(serialize = "control")]
    ControlModule,
    #[strum(serialize = "unit")]
    Unit,
    #[strum(serialize = "cell")]
    ProcessCell,
    #[strum(serialize = "valve")]
    ValveModule,
    #[strum(serialize = "motor")]
    MotorModule,
    #[strum(serialize = "analog-in")]
    AnalogInputModule,
    #[strum(serialize = "analog-out")]
    AnalogOutputModule,
}

impl BuiltinType {
    /// Build a fresh definition for this built-in
    pub fn build(&self) -> TypeDefinition {
        match self {
            BuiltinType::Identifier => identifier(),
            BuiltinType::Status => status(),
            BuiltinType::Command => command(),
            BuiltinType::Value => value(),
            BuiltinType::Alarm => alarm(),
            BuiltinType::EquipmentModule => equipment::equipment_module(),
            BuiltinType::ControlModule => equipment::control_module(),
            BuiltinType::Unit => equipment::unit(),
            BuiltinType::ProcessCell => equipment::process_cell(),
            BuiltinType::ValveModule => equipment::valve_module(),
            BuiltinType::MotorModule => equipment::motor_module(),
            BuiltinType::AnalogInputModule => equipment::analog_input_module(),
            BuiltinType::AnalogOutputModule => equipment::analog_output_module(),
        }
    }

    /// All user-facing keys, comma separated
    pub fn keys() -> String {
        BuiltinType::iter()
            .map(|b| b.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
