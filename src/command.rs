use crate::session::Session;
use anyhow::Result;
use std::io::Write;

pub type ExitCode = i32;

/// What the main loop should do after one dispatched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing ran (blank input); read the next line.
    Continue,
    /// `exit` or `quit` was entered; the loop terminates.
    Exit,
    /// A built-in executed in-process.
    RanBuiltin,
    /// The line was handed to the external launcher.
    RanExternal,
}

/// A command instance ready to run against the session.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

/// Creates [`ExecutableCommand`] instances by name.
pub trait CommandFactory {
    /// Returns a command if `name` belongs to this factory, `None` otherwise.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
