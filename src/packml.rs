//! PackML-style equipment state machine generator.
//!
//! The machine is fixed: ten operating states driven by pulsed commands. The
//! transition table below is the single source for every dialect; a dialect
//! only decides how the instance path is quoted and how the header comment is
//! delimited.

use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Sub-state value that marks an acting state as complete
pub const SUBSTATE_COMPLETE: u16 = 100;

/// PackML operating states. Code 7 is reserved.
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PackMlState {
    Stopped = 0,
    Idle = 1,
    Starting = 2,
    Execute = 3,
    Holding = 4,
    Held = 5,
    Stopping = 6,
    Aborting = 8,
    Aborted = 9,
    Unholding = 10,
}

impl PackMlState {
    pub const INITIAL: PackMlState = PackMlState::Stopped;

    /// State number written to `Status.State`
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        PackMlState::iter().find(|s| s.code() == code)
    }
}

/// Pulsed commands, cleared at the end of every cycle
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum PackMlCommand {
    Reset,
    Start,
    Stop,
    Hold,
    Unhold,
    Abort,
    Clear,
}

/// Transition guard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Command(PackMlCommand),
    /// `Status.SubState = 100`
    SubStateComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: PackMlState,
    pub guard: Guard,
    pub to: PackMlState,
}

const fn on(from: PackMlState, command: PackMlCommand, to: PackMlState) -> Transition {
    Transition {
        from,
        guard: Guard::Command(command),
        to,
    }
}

const fn done(from: PackMlState, to: PackMlState) -> Transition {
    Transition {
        from,
        guard: Guard::SubStateComplete,
        to,
    }
}

/// Transitions in priority order within each source state
static TRANSITIONS: [Transition; 12] = [
    on(PackMlState::Stopped, PackMlCommand::Reset, PackMlState::Idle),
    on(PackMlState::Idle, PackMlCommand::Start, PackMlState::Starting),
    done(PackMlState::Starting, PackMlState::Execute),
    on(PackMlState::Execute, PackMlCommand::Hold, PackMlState::Holding),
    on(PackMlState::Execute, PackMlCommand::Stop, PackMlState::Stopping),
    on(PackMlState::Execute, PackMlCommand::Abort, PackMlState::Aborting),
    done(PackMlState::Holding, PackMlState::Held),
    on(PackMlState::Held, PackMlCommand::Unhold, PackMlState::Unholding),
    done(PackMlState::Stopping, PackMlState::Stopped),
    done(PackMlState::Aborting, PackMlState::Aborted),
    on(PackMlState::Aborted, PackMlCommand::Clear, PackMlState::Stopped),
    done(PackMlState::Unholding, PackMlState::Execute),
];

/// All transitions, grouped by source state
pub fn transitions() -> &'static [Transition] {
    &TRANSITIONS
}

/// Transitions leaving `state`, highest priority first
pub fn transitions_from(state: PackMlState) -> impl Iterator<Item = &'static Transition> {
    TRANSITIONS.iter().filter(move |t| t.from == state)
}

/// Comment delimiter for the generated header line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentStyle {
    /// `(* ... *)`
    Block,
    /// `// ...`
    Line,
}

/// Per-vendor rendering conventions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    /// Wrap the instance name in double quotes (global DB access)
    pub quote_instance: bool,
    pub header: CommentStyle,
}

impl Dialect {
    fn instance_path(&self, instance: &str) -> String {
        if self.quote_instance {
            format!("\"{}\"", instance)
        } else {
            instance.to_string()
        }
    }
}

/// Render the state machine for `instance`. The name is interpolated verbatim.
pub fn render(instance: &str, dialect: &Dialect) -> String {
    let p = dialect.instance_path(instance);
    let mut out = String::new();

    let title = format!("PackML State Machine for {}", instance);
    match dialect.header {
        CommentStyle::Block => out.push_str(&format!("(* {} *)\n", title)),
        CommentStyle::Line => out.push_str(&format!("// {}\n", title)),
    }
    out.push('\n');

    out.push_str(&format!("CASE {}.Status.State OF\n", p));
    for state in PackMlState::iter() {
        out.push_str(&format!("  {}: (* {} *)\n", state.code(), state));
        for (i, transition) in transitions_from(state).enumerate() {
            let keyword = if i == 0 { "IF" } else { "ELSIF" };
            out.push_str(&format!(
                "    {} {} THEN\n",
                keyword,
                guard_expr(&p, transition.guard)
            ));
            out.push_str(&format!(
                "      {}.Status.State := {}; (* {} *)\n",
                p,
                transition.to.code(),
                transition.to
            ));
            out.push_str(&format!("      {}.Status.StateName := '{}';\n", p, transition.to));
            out.push_str(&format!("      {}.Status.SubState := 0;\n", p));
        }
        out.push_str("    END_IF;\n\n");
    }
    out.push_str("END_CASE;\n\n");

    out.push_str("(* Clear all commands after processing *)\n");
    for command in PackMlCommand::iter() {
        out.push_str(&format!("{}.Command.{} := FALSE;\n", p, command));
    }

    out
}

fn guard_expr(path: &str, guard: Guard) -> String {
    match guard {
        Guard::Command(command) => format!("{}.Command.{}", path, command),
        Guard::SubStateComplete => format!("{}.Status.SubState = {}", path, SUBSTATE_COMPLETE),
    }
}
