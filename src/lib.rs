//! A relocatable native entry point for the bundled mclone tool.
//!
//! The launcher finds the directory it is installed in, builds the command
//! line for the bundled interpreter (`ruby/bin/ruby.exe ruby/bin/mclone ...`),
//! tells the child where the bundled rclone binary is through the `RCLONE`
//! environment variable, and waits for the child, passing its exit code on.
//!
//! The pieces are exposed separately so they can be tested and reused:
//! [`Locator`] strategies find the [`InstallRoot`], [`Layout`] says where the
//! bundled components live below it, [`ChildCommand`] and [`ChildEnvironment`]
//! describe the child, and a [`Spawner`] runs it. [`Launcher`] wires them
//! together.

pub mod command;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod layout;
mod launcher;
pub mod locator;
pub mod path;
mod spawn;

pub use command::{ChildCommand, ExitCode, Spawner};
pub use env::{ChildEnvironment, EnvEntry, InjectionPolicy};
pub use error::{EnvError, LaunchError, LocateError, SpawnError};
pub use launcher::{LaunchPlan, Launcher};
pub use layout::{Layout, ResolvedLayout};
pub use locator::{Argv0Locator, DefaultLocator, FixedLocator, ImageLocator, Locator};
pub use path::InstallRoot;
pub use spawn::ProcessSpawner;
