use crate::env::ChildEnvironment;
use crate::error::SpawnError;
use crate::layout::ResolvedLayout;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Exit code the launcher hands back to its caller.
///
/// Either the child's own code, passed through untouched, or one of the
/// launcher failure codes in [`crate::error`] when the child never ran.
pub type ExitCode = i32;

/// Argument vector of the child process.
///
/// Element 0 is the interpreter, element 1 the sub-tool, and the rest are the
/// launcher's own arguments from index 1 onward, byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildCommand {
    argv: Vec<OsString>,
}

impl ChildCommand {
    /// Build the child argument vector from the launcher's full argument list.
    ///
    /// `args[0]` is the launcher's invocation path and is replaced; everything
    /// after it is forwarded as discrete arguments, never re-joined or quoted.
    pub fn build<I, A>(layout: &ResolvedLayout, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let mut argv = vec![
            OsString::from(&layout.interpreter),
            OsString::from(&layout.sub_tool),
        ];
        argv.extend(args.into_iter().skip(1).map(Into::into));
        Self { argv }
    }

    /// Image the child process is started from.
    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    /// Arguments after the program itself.
    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    /// The whole vector, program included.
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }
}

impl fmt::Display for ChildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Starts a child process and blocks until it terminates.
///
/// The launcher uses [`crate::ProcessSpawner`]; tests plug in doubles that
/// record what they were asked to run.
pub trait Spawner {
    /// Run `command` with exactly `env` as its environment and return its
    /// exit code.
    fn spawn_and_wait(
        &self,
        command: &ChildCommand,
        env: &ChildEnvironment,
    ) -> Result<ExitCode, SpawnError>;
}
