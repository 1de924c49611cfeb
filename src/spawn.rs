use crate::command::{ChildCommand, ExitCode, Spawner};
use crate::env::ChildEnvironment;
use crate::error::SpawnError;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Spawner backed by [`std::process::Command`].
///
/// The child inherits stdio and sees exactly the given environment, nothing
/// from the parent that was not copied into it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn_and_wait(
        &self,
        command: &ChildCommand,
        env: &ChildEnvironment,
    ) -> Result<ExitCode, SpawnError> {
        let program = PathBuf::from(command.program());
        let mut child = Command::new(&program)
            .args(command.args())
            .env_clear()
            .envs(env.iter())
            .spawn()
            .map_err(|source| SpawnError::Start {
                program: program.clone(),
                source,
            })?;
        log::debug!("started {} as pid {}", program.display(), child.id());

        let exit_status = child
            .wait()
            .map_err(|source| SpawnError::Wait { program, source })?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

/// Code for a child that ended without one: `128 + signal`, as shells report it.
#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
