//! ISA-88 equipment model UDTs

use super::types::ScalarKind::{Bool, Int, Lint, Real, String as Str};
use super::types::{Literal, TypeDefinition, TypeRef};

fn off() -> Option<Literal> {
    Some(Literal::Bool(false))
}

fn zero() -> Option<Literal> {
    Some(Literal::Int(0))
}

fn real(v: f64) -> Option<Literal> {
    Some(Literal::Real(v))
}

fn empty() -> Option<Literal> {
    Some(Literal::Text(String::new()))
}

/// Zero-based STRING array of `size` elements
fn string_array(size: i64) -> TypeRef {
    TypeRef::Array {
        base: Box::new(Str.into()),
        lower: 0,
        upper: size - 1,
    }
}

/// Identifier / Status / Command header shared by the module types
fn module_header(name: &str, description: &str, noun: &str) -> TypeDefinition {
    TypeDefinition::new(name, description)
        .with_member("ID", TypeRef::named("Identifier"), None, format!("{} identifier", noun))
        .with_member("Status", TypeRef::named("Status"), None, format!("{} status", noun))
        .with_member("Command", TypeRef::named("Command"), None, format!("{} commands", noun))
}

/// ISA-88 base equipment unit
pub fn equipment_module() -> TypeDefinition {
    module_header("EquipmentModule", "ISA-88 Equipment Module", "Equipment")
        .with_member("Location", Str, empty(), "Physical location")
        .with_member("Description", Str, empty(), "Equipment description")
        .with_member("Manufacturer", Str, empty(), "Manufacturer name")
        .with_member("Model", Str, empty(), "Model number")
        .with_member("SerialNumber", Str, empty(), "Serial number")
        .with_member("InstallDate", Lint, zero(), "Installation date (Unix ms)")
        .with_member("MaintenanceDue", Lint, zero(), "Next maintenance date")
}

pub fn control_module() -> TypeDefinition {
    module_header(
        "ControlModule",
        "ISA-88 Control Module - Basic equipment control",
        "Module",
    )
    .with_member("ParentEquipment", Str, empty(), "Parent equipment ID")
    .with_member("Type", Str, empty(), "Module type (e.g., \"Valve\", \"Motor\", \"Pump\")")
    .with_member("Interlock", Bool, off(), "Interlock active")
    .with_member("InterlockSource", Str, empty(), "Interlock source description")
    .with_member("PermissiveOK", Bool, off(), "All permissives satisfied")
    .with_member("FeedbackOK", Bool, off(), "Feedback matches commanded state")
}

/// ISA-88 Unit (e.g., reactor, tank)
pub fn unit() -> TypeDefinition {
    module_header(
        "Unit",
        "ISA-88 Unit - Equipment that carries out one or more process functions",
        "Unit",
    )
    .with_member("Equipment", string_array(32), None, "Equipment module IDs")
    .with_member("EquipmentCount", Int, zero(), "Number of equipment modules")
    .with_member("CurrentRecipe", Str, empty(), "Current recipe name")
    .with_member("BatchID", Str, empty(), "Current batch ID")
    .with_member("RecipePhase", Int, zero(), "Current recipe phase")
    .with_member("PhaseComplete", Real, real(0.0), "Phase completion %")
}

/// ISA-88 Process Cell. Cells carry no command interface.
pub fn process_cell() -> TypeDefinition {
    TypeDefinition::new(
        "ProcessCell",
        "ISA-88 Process Cell - Logical grouping of equipment",
    )
    .with_member("ID", TypeRef::named("Identifier"), None, "Cell identifier")
    .with_member("Status", TypeRef::named("Status"), None, "Cell status")
    .with_member("Units", string_array(16), None, "Unit IDs in this cell")
    .with_member("UnitCount", Int, zero(), "Number of units")
    .with_member("ProductionMode", Int, zero(), "Production mode")
    .with_member("Schedule", Str, empty(), "Current production schedule")
}

pub fn valve_module() -> TypeDefinition {
    module_header(
        "ValveModule",
        "Valve control module with position feedback",
        "Valve",
    )
    .with_member("Open", Bool, off(), "Open command")
    .with_member("Close", Bool, off(), "Close command")
    .with_member("OpenFeedback", Bool, off(), "Valve is fully open")
    .with_member("CloseFeedback", Bool, off(), "Valve is fully closed")
    .with_member("Position", Real, real(0.0), "Valve position % (0-100)")
    .with_member("FailPosition", Int, zero(), "Fail position (0=Close, 1=Open, 2=Stay)")
    .with_member("TravelTime", Real, real(0.0), "Expected travel time (s)")
}

pub fn motor_module() -> TypeDefinition {
    module_header(
        "MotorModule",
        "Motor control module with running feedback",
        "Motor",
    )
    .with_member("Start", Bool, off(), "Start command")
    .with_member("Stop", Bool, off(), "Stop command")
    .with_member("Running", Bool, off(), "Motor running feedback")
    .with_member("Fault", Bool, off(), "Motor fault")
    .with_member("Speed", Real, real(0.0), "Speed setpoint (Hz or %)")
    .with_member("SpeedFeedback", Real, real(0.0), "Actual speed")
    .with_member("Current", Real, real(0.0), "Motor current (A)")
    .with_member("OverloadTrip", Bool, off(), "Overload protection tripped")
}

/// Analog input with scaling and alarming
pub fn analog_input_module() -> TypeDefinition {
    TypeDefinition::new("AnalogInputModule", "Analog input with scaling and alarming")
        .with_member("ID", TypeRef::named("Identifier"), None, "Input identifier")
        .with_member("RawValue", Int, zero(), "Raw ADC value")
        .with_member("ScaledValue", Real, real(0.0), "Scaled engineering value")
        .with_member("Unit", Str, empty(), "Engineering unit")
        .with_member("RawMin", Int, zero(), "Raw minimum (e.g., 0)")
        .with_member("RawMax", Int, Some(Literal::Int(32767)), "Raw maximum (e.g., 32767)")
        .with_member("ScaleMin", Real, real(0.0), "Scaled minimum")
        .with_member("ScaleMax", Real, real(100.0), "Scaled maximum")
        .with_member("HighAlarm", Real, real(90.0), "High alarm setpoint")
        .with_member("LowAlarm", Real, real(10.0), "Low alarm setpoint")
        .with_member("AlarmEnabled", Bool, Some(Literal::Bool(true)), "Alarms enabled")
        .with_member("AlarmActive", Bool, off(), "Alarm active")
}

/// Analog output with scaling
pub fn analog_output_module() -> TypeDefinition {
    TypeDefinition::new("AnalogOutputModule", "Analog output with scaling")
        .with_member("ID", TypeRef::named("Identifier"), None, "Output identifier")
        .with_member("Setpoint", Real, real(0.0), "Engineering setpoint")
        .with_member("RawOutput", Int, zero(), "Raw DAC value")
        .with_member("Unit", Str, empty(), "Engineering unit")
        .with_member("RawMin", Int, zero(), "Raw minimum")
        .with_member("RawMax", Int, Some(Literal::Int(32767)), "Raw maximum")
        .with_member("ScaleMin", Real, real(0.0), "Scaled minimum")
        .with_member("ScaleMax", Real, real(100.0), "Scaled maximum")
        .with_member("ManualMode", Bool, off(), "Manual mode active")
        .with_member("ManualValue", Real, real(0.0), "Manual setpoint")
}
