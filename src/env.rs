use crate::error::EnvError;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// A single `KEY=VALUE` pair of a process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: OsString,
    pub value: OsString,
}

impl EnvEntry {
    pub fn new(key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(OsString, OsString)> for EnvEntry {
    fn from((key, value): (OsString, OsString)) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for EnvEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key.to_string_lossy(), self.value.to_string_lossy())
    }
}

/// What to do when the parent environment already defines the injected key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InjectionPolicy {
    /// Drop the parent's value; the bundled helper always wins.
    #[default]
    Override,
    /// Keep the parent's value and leave the injected entry out.
    Defer,
    /// Refuse to launch.
    Reject,
}

/// Ordered environment handed to the child process.
///
/// The injected entry, when present, comes first; parent entries follow in
/// their original order. Nothing is ever written back to the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildEnvironment {
    entries: Vec<EnvEntry>,
}

impl ChildEnvironment {
    /// Compose the child environment from the injected entry and a copy of
    /// the parent environment.
    pub fn build<I, E>(
        injected: EnvEntry,
        parent: I,
        policy: InjectionPolicy,
    ) -> Result<Self, EnvError>
    where
        I: IntoIterator<Item = E>,
        E: Into<EnvEntry>,
    {
        let parent: Vec<EnvEntry> = parent.into_iter().map(Into::into).collect();
        let existing = parent
            .iter()
            .find(|e| same_key(&e.key, &injected.key))
            .map(|e| e.value.clone());

        let mut entries = Vec::with_capacity(parent.len() + 1);
        match (policy, existing) {
            (_, None) => {
                entries.push(injected);
                entries.extend(parent);
            }
            (InjectionPolicy::Override, Some(_)) => {
                let key = injected.key.clone();
                entries.push(injected);
                entries.extend(parent.into_iter().filter(|e| !same_key(&e.key, &key)));
            }
            (InjectionPolicy::Defer, Some(_)) => entries.extend(parent),
            (InjectionPolicy::Reject, Some(existing)) => {
                return Err(EnvError::Conflict {
                    key: injected.key.to_string_lossy().into_owned(),
                    existing: existing.to_string_lossy().into_owned(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Entries in the order the child receives them.
    pub fn entries(&self) -> &[EnvEntry] {
        &self.entries
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the child would start with an empty environment.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value stored under `key`, scanning front to back.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|e| same_key(&e.key, key))
            .map(|e| e.value.as_os_str())
    }

    /// `(key, value)` pairs in order, ready for [`std::process::Command::envs`].
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_os_str(), e.value.as_os_str()))
    }
}

#[cfg(windows)]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(not(windows))]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a == b
}
