use crate::error::LocateError;
use std::fmt;

/// Separator the host platform uses in paths it hands back to us.
pub const NATIVE_SEPARATOR: char = std::path::MAIN_SEPARATOR;

/// Rewrite every native separator in `path` to a forward slash.
pub fn normalize(path: &str) -> String {
    normalize_with(path, NATIVE_SEPARATOR)
}

/// Same as [`normalize`], with the native separator given explicitly.
///
/// Applying it twice yields the same string as applying it once.
pub fn normalize_with(path: &str, native: char) -> String {
    if native == '/' {
        path.to_owned()
    } else {
        path.replace(native, "/")
    }
}

/// Strip the trailing file name from `path`, keeping the containing directory.
///
/// Both `native` and `/` count as separators. Fails instead of guessing when
/// the path has no separator at all.
pub fn parent_dir(path: &str, native: char) -> Result<&str, LocateError> {
    let is_sep = |c: char| c == native || c == '/';
    match path.rfind(is_sep) {
        Some(idx) => Ok(path[..idx].trim_end_matches(is_sep)),
        None => Err(LocateError::NoSeparator {
            path: path.to_owned(),
        }),
    }
}

/// Absolute directory holding the launcher, always with `/` separators and
/// never with a trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot(String);

impl InstallRoot {
    /// Derive the root from the full path of the launcher executable.
    pub fn from_executable_path(path: &str) -> Result<Self, LocateError> {
        Self::from_executable_path_with(path, NATIVE_SEPARATOR)
    }

    /// Same as [`InstallRoot::from_executable_path`], with the native separator given explicitly.
    pub fn from_executable_path_with(path: &str, native: char) -> Result<Self, LocateError> {
        let dir = parent_dir(path, native)?;
        Ok(Self(normalize_with(dir, native)))
    }

    /// Use `dir` itself as the root.
    pub fn from_dir(dir: &str) -> Self {
        let normalized = normalize(dir);
        Self(normalized.trim_end_matches('/').to_owned())
    }

    /// The normalized root, without a trailing separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute path of `relative` below the root.
    pub fn join(&self, relative: &str) -> String {
        format!("{}/{}", self.0, relative.trim_start_matches('/'))
    }
}

impl fmt::Display for InstallRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            r"C:\install\dir",
            "C:/install/dir",
            r"C:\mixed/sep\path",
            r"\\server\share\mclone",
            "",
            "/",
        ];
        for sample in samples {
            let once = normalize_with(sample, '\\');
            assert_eq!(normalize_with(&once, '\\'), once, "sample {sample:?}");
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn normalize_leaves_forward_slashes_alone() {
        assert_eq!(normalize_with("/install/dir", '\\'), "/install/dir");
        assert_eq!(normalize_with("/install/dir", '/'), "/install/dir");
    }

    #[test]
    fn root_of_unix_executable() {
        let root = InstallRoot::from_executable_path_with("/install/dir/launcher", '/').unwrap();
        assert_eq!(root.as_str(), "/install/dir");
    }

    #[test]
    fn root_of_windows_executable() {
        let root =
            InstallRoot::from_executable_path_with(r"C:\install\dir\launcher.exe", '\\').unwrap();
        assert_eq!(root.as_str(), "C:/install/dir");
    }

    #[test]
    fn forward_slash_is_accepted_on_windows_too() {
        let root = InstallRoot::from_executable_path_with(r"C:\install/dir/mclone.exe", '\\')
            .unwrap();
        assert_eq!(root.as_str(), "C:/install/dir");
    }

    #[test]
    fn repeated_separators_are_trimmed() {
        let root = InstallRoot::from_executable_path_with("/install/dir//launcher", '/').unwrap();
        assert_eq!(root.as_str(), "/install/dir");
    }

    #[test]
    fn executable_in_filesystem_root() {
        let root = InstallRoot::from_executable_path_with("/launcher", '/').unwrap();
        assert_eq!(root.as_str(), "");
        assert_eq!(root.join("ruby/bin/ruby.exe"), "/ruby/bin/ruby.exe");
    }

    #[test]
    fn path_without_separator_is_an_error() {
        let err = parent_dir("launcher", '/').unwrap_err();
        assert!(matches!(err, LocateError::NoSeparator { path } if path == "launcher"));
        assert!(parent_dir("", '\\').is_err());
    }

    #[test]
    fn join_uses_forward_slash() {
        let root = InstallRoot::from_dir("/opt/mclone/");
        assert_eq!(root.as_str(), "/opt/mclone");
        assert_eq!(root.join("rclone/rclone.exe"), "/opt/mclone/rclone/rclone.exe");
    }
}
