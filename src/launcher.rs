use crate::command::{ChildCommand, ExitCode, Spawner};
use crate::diagnostics;
use crate::env::{ChildEnvironment, EnvEntry, InjectionPolicy};
use crate::error::LaunchError;
use crate::layout::Layout;
use crate::locator::{DefaultLocator, Locator};
use crate::path::InstallRoot;
use crate::spawn::ProcessSpawner;
use anyhow::Context;
use std::ffi::OsString;

/// Everything needed to start the child, computed before anything is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub root: InstallRoot,
    pub command: ChildCommand,
    pub environment: ChildEnvironment,
}

/// Relays an invocation to the bundled interpreter.
///
/// The launcher owns a [`Locator`] that finds the installation root and a
/// [`Spawner`] that runs the child. See [`Default`] for the strategies used
/// by the `mclone` binary.
///
/// Example
/// ```no_run
/// use mclone_launcher::Launcher;
/// let args: Vec<_> = std::env::args_os().collect();
/// let code = Launcher::default().run(args, std::env::vars_os()).unwrap();
/// std::process::exit(code);
/// ```
pub struct Launcher {
    locator: Box<dyn Locator>,
    spawner: Box<dyn Spawner>,
    layout: Layout,
    policy: InjectionPolicy,
    dump: bool,
}

impl Launcher {
    /// Create a launcher with the given strategies and the default layout.
    pub fn new(locator: Box<dyn Locator>, spawner: Box<dyn Spawner>) -> Self {
        Self {
            locator,
            spawner,
            layout: Layout::default(),
            policy: InjectionPolicy::default(),
            dump: false,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_policy(mut self, policy: InjectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Print the plan to stdout before spawning.
    pub fn with_dump(mut self, dump: bool) -> Self {
        self.dump = dump;
        self
    }

    /// Resolve the root and compose the child's command line and environment.
    ///
    /// `args` is the launcher's full argument list including argument 0;
    /// `parent_env` is the environment to copy into the child.
    pub fn prepare<A, E>(&self, args: A, parent_env: E) -> Result<LaunchPlan, LaunchError>
    where
        A: IntoIterator,
        A::Item: Into<OsString>,
        E: IntoIterator,
        E::Item: Into<EnvEntry>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let root = self.locator.locate(args.first().map(OsString::as_os_str))?;
        log::debug!("installation root: {root}");

        let resolved = self.layout.resolve(&root);
        let command = ChildCommand::build(&resolved, args);
        log::debug!("interpreter: {}", resolved.interpreter);

        let environment =
            ChildEnvironment::build(resolved.helper_entry(), parent_env, self.policy)?;
        log::debug!(
            "{} set for child, {} variables in total",
            resolved.helper_var,
            environment.len()
        );

        Ok(LaunchPlan {
            root,
            command,
            environment,
        })
    }

    /// Prepare the plan, run the child and return its exit code.
    ///
    /// Errors carry a [`LaunchError`] that
    /// [`anyhow::Error::downcast_ref`] can recover, e.g. to pick the exit code.
    pub fn run<A, E>(&self, args: A, parent_env: E) -> anyhow::Result<ExitCode>
    where
        A: IntoIterator,
        A::Item: Into<OsString>,
        E: IntoIterator,
        E::Item: Into<EnvEntry>,
    {
        let plan = self
            .prepare(args, parent_env)
            .context("cannot prepare the interpreter command")?;

        if self.dump {
            diagnostics::dump(&mut std::io::stdout().lock(), &plan, true)
                .context("cannot write diagnostics")?;
        }

        let code = self
            .spawner
            .spawn_and_wait(&plan.command, &plan.environment)
            .map_err(LaunchError::from)?;
        log::debug!("child exited with {code}");
        Ok(code)
    }
}

impl Default for Launcher {
    /// Create a launcher with the compiled-in strategies:
    /// - the [`DefaultLocator`] chosen by the `argv0-locator` feature
    /// - a [`ProcessSpawner`]
    /// - the build-time [`Layout`], overriding any inherited helper variable
    /// - the plan dump when the `dump` feature is on
    fn default() -> Self {
        Self::new(Box::new(DefaultLocator::default()), Box::new(ProcessSpawner))
            .with_layout(Layout::from_build_env())
            .with_dump(cfg!(feature = "dump"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EnvError, LocateError, SpawnError};
    use crate::locator::FixedLocator;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(ChildCommand, ChildEnvironment)>>>;

    /// Records what it was asked to run and answers with a fixed exit code.
    struct RecordingSpawner {
        calls: Calls,
        exit_code: ExitCode,
    }

    impl Spawner for RecordingSpawner {
        fn spawn_and_wait(
            &self,
            command: &ChildCommand,
            env: &ChildEnvironment,
        ) -> Result<ExitCode, SpawnError> {
            self.calls.borrow_mut().push((command.clone(), env.clone()));
            Ok(self.exit_code)
        }
    }

    fn launcher(exit_code: ExitCode) -> (Launcher, Calls) {
        let calls = Calls::default();
        let spawner = RecordingSpawner {
            calls: calls.clone(),
            exit_code,
        };
        let locator = FixedLocator(InstallRoot::from_dir("/install/dir"));
        (Launcher::new(Box::new(locator), Box::new(spawner)), calls)
    }

    fn parent_env() -> Vec<(OsString, OsString)> {
        vec![
            ("PATH".into(), "/usr/bin".into()),
            ("TERM".into(), "xterm".into()),
        ]
    }

    #[test]
    fn prepare_builds_full_plan() {
        let (launcher, _) = launcher(0);
        let plan = launcher
            .prepare(["/install/dir/mclone", "sync", "a:", "b:"], parent_env())
            .unwrap();

        assert_eq!(plan.root.as_str(), "/install/dir");
        assert_eq!(
            plan.command.to_string(),
            "/install/dir/ruby/bin/ruby.exe /install/dir/ruby/bin/mclone sync a: b:"
        );
        let env: Vec<String> = plan
            .environment
            .entries()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            env,
            [
                "RCLONE=/install/dir/rclone/rclone.exe",
                "PATH=/usr/bin",
                "TERM=xterm",
            ]
        );
    }

    #[test]
    fn run_hands_plan_to_spawner_and_returns_its_code() {
        let (launcher, calls) = launcher(3);
        let code = launcher
            .run(["/install/dir/mclone", "info"], parent_env())
            .unwrap();
        assert_eq!(code, 3);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        let (command, env) = &calls[0];
        assert_eq!(command.program(), "/install/dir/ruby/bin/ruby.exe");
        assert_eq!(command.args().len(), 2);
        assert_eq!(env.len(), parent_env().len() + 1);
    }

    #[test]
    fn location_failure_does_not_spawn() {
        let calls = Calls::default();
        let spawner = RecordingSpawner {
            calls: calls.clone(),
            exit_code: 0,
        };
        let launcher = Launcher::new(Box::new(crate::Argv0Locator), Box::new(spawner));

        let err = launcher.run(["mclone"], parent_env()).unwrap_err();
        let launch = err.downcast_ref::<LaunchError>().unwrap();
        assert!(matches!(
            launch,
            LaunchError::Locate(LocateError::NoSeparator { .. })
        ));
        assert_eq!(launch.exit_code(), crate::error::LOCATE_FAILED);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn reject_policy_stops_on_inherited_helper() {
        let (launcher, calls) = launcher(0);
        let launcher = launcher.with_policy(InjectionPolicy::Reject);
        let mut env = parent_env();
        env.push(("RCLONE".into(), "/usr/bin/rclone".into()));

        let err = launcher.run(["/install/dir/mclone"], env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LaunchError>(),
            Some(LaunchError::Environment(EnvError::Conflict { .. }))
        ));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn custom_layout_is_honoured() {
        let (launcher, _) = launcher(0);
        let launcher = launcher.with_layout(Layout {
            interpreter: "rt/ruby".into(),
            sub_tool: "rt/app.rb".into(),
            helper: "bin/rclone".into(),
            helper_var: "MCLONE_RCLONE".into(),
        });
        let plan = launcher.prepare(["/install/dir/mclone"], parent_env()).unwrap();
        assert_eq!(plan.command.program(), "/install/dir/rt/ruby");
        assert_eq!(
            plan.environment.get("MCLONE_RCLONE"),
            Some(std::ffi::OsStr::new("/install/dir/bin/rclone"))
        );
    }
}
