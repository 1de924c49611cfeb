use crate::command::ExitCode;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code reported when the installation root cannot be determined.
pub const LOCATE_FAILED: ExitCode = 125;
/// Exit code reported when the child environment cannot be composed.
pub const ENV_CONFLICT: ExitCode = 124;
/// Exit code reported when the interpreter image does not exist.
pub const SPAWN_NOT_FOUND: ExitCode = 127;
/// Exit code reported when the interpreter exists but could not be started.
pub const SPAWN_FAILED: ExitCode = 126;

/// Reasons the launcher could not work out where it is installed.
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("cannot determine the path of the running executable")]
    CurrentExe(#[source] io::Error),

    #[error("no invocation path was supplied in argument 0")]
    MissingArgv0,

    #[error("cannot determine the current directory")]
    CurrentDir(#[source] io::Error),

    #[error("executable path {0:?} is not valid Unicode")]
    NotUnicode(OsString),

    #[error("executable path '{path}' contains no directory separator")]
    NoSeparator { path: String },
}

/// Reasons the child environment could not be composed.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("{key} is already set to '{existing}' in the parent environment")]
    Conflict { key: String, existing: String },
}

/// Reasons the child process could not be run to completion.
#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("cannot start {}", .program.display())]
    Start {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for {}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every failure of the launcher itself, as opposed to a failure of the child.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Environment(#[from] EnvError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

impl LaunchError {
    /// Process exit code the launcher reports for this failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LaunchError::Locate(_) => LOCATE_FAILED,
            LaunchError::Environment(_) => ENV_CONFLICT,
            LaunchError::Spawn(SpawnError::Start { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                SPAWN_NOT_FOUND
            }
            LaunchError::Spawn(_) => SPAWN_FAILED,
        }
    }
}
