//! Strategies for finding the installation root.
//!
//! The launcher is relocatable: every bundled component is resolved against the
//! directory that holds the launcher binary, so the only thing that has to be
//! discovered at run time is that directory.

use crate::error::LocateError;
use crate::path::{InstallRoot, NATIVE_SEPARATOR};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Something that can tell where the launcher is installed.
///
/// `argv0` is the launcher's own argument 0, when there is one. Strategies
/// that ask the operating system ignore it.
pub trait Locator {
    fn locate(&self, argv0: Option<&OsStr>) -> Result<InstallRoot, LocateError>;
}

/// Asks the operating system for the path of the running image.
///
/// Works no matter how the launcher was started: through PATH, via a relative
/// path or a symlink.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageLocator;

impl Locator for ImageLocator {
    fn locate(&self, _argv0: Option<&OsStr>) -> Result<InstallRoot, LocateError> {
        let exe = std::env::current_exe().map_err(LocateError::CurrentExe)?;
        root_of(exe)
    }
}

/// Trusts argument 0 as the path the launcher was started from.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argv0Locator;

impl Locator for Argv0Locator {
    fn locate(&self, argv0: Option<&OsStr>) -> Result<InstallRoot, LocateError> {
        let argv0 = argv0.ok_or(LocateError::MissingArgv0)?;
        let path = Path::new(argv0);

        // A bare name means the shell found us through PATH.
        let text = argv0
            .to_str()
            .ok_or_else(|| LocateError::NotUnicode(argv0.to_owned()))?;
        if !text.contains(['/', NATIVE_SEPARATOR]) {
            return Err(LocateError::NoSeparator {
                path: text.to_owned(),
            });
        }

        if path.is_absolute() {
            return root_of(path.to_path_buf());
        }
        let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
        let relative = path.strip_prefix(".").unwrap_or(path);
        root_of(cwd.join(relative))
    }
}

/// Always answers with the same root.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub InstallRoot);

impl Locator for FixedLocator {
    fn locate(&self, _argv0: Option<&OsStr>) -> Result<InstallRoot, LocateError> {
        Ok(self.0.clone())
    }
}

/// Strategy compiled into the launcher binary.
#[cfg(not(feature = "argv0-locator"))]
pub type DefaultLocator = ImageLocator;

/// Strategy compiled into the launcher binary.
#[cfg(feature = "argv0-locator")]
pub type DefaultLocator = Argv0Locator;

fn root_of(exe: PathBuf) -> Result<InstallRoot, LocateError> {
    let exe = exe
        .into_os_string()
        .into_string()
        .map_err(LocateError::NotUnicode)?;
    InstallRoot::from_executable_path(&exe)
}
