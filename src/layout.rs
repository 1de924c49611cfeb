use crate::env::EnvEntry;
use crate::path::InstallRoot;
use std::path::Path;

/// Where the bundled components live, relative to the installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Interpreter binary that becomes the child process image.
    pub interpreter: String,
    /// Interpreted entry point, passed as the interpreter's first argument.
    pub sub_tool: String,
    /// Helper binary advertised to the child through `helper_var`.
    pub helper: String,
    /// Name of the environment variable carrying the helper path.
    pub helper_var: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            interpreter: "ruby/bin/ruby.exe".into(),
            sub_tool: "ruby/bin/mclone".into(),
            helper: "rclone/rclone.exe".into(),
            helper_var: "RCLONE".into(),
        }
    }
}

impl Layout {
    /// The default layout with any overrides the packager set at compile time.
    pub fn from_build_env() -> Self {
        let default = Self::default();
        Self {
            interpreter: option_env!("MCLONE_LAYOUT_INTERPRETER")
                .map_or(default.interpreter, str::to_owned),
            sub_tool: option_env!("MCLONE_LAYOUT_SUB_TOOL").map_or(default.sub_tool, str::to_owned),
            helper: option_env!("MCLONE_LAYOUT_HELPER").map_or(default.helper, str::to_owned),
            helper_var: option_env!("MCLONE_LAYOUT_HELPER_VAR")
                .map_or(default.helper_var, str::to_owned),
        }
    }

    /// Resolve every component against one root.
    pub fn resolve(&self, root: &InstallRoot) -> ResolvedLayout {
        ResolvedLayout {
            interpreter: root.join(&self.interpreter),
            sub_tool: root.join(&self.sub_tool),
            helper: root.join(&self.helper),
            helper_var: self.helper_var.clone(),
        }
    }
}

/// Absolute paths of the bundled components for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub interpreter: String,
    pub sub_tool: String,
    pub helper: String,
    pub helper_var: String,
}

impl ResolvedLayout {
    /// Entry telling the child where the helper binary is.
    pub fn helper_entry(&self) -> EnvEntry {
        EnvEntry::new(&self.helper_var, &self.helper)
    }

    /// Components that do not exist on disk, as `(component, path)` pairs.
    pub fn missing(&self) -> Vec<(&'static str, &str)> {
        [
            ("interpreter", self.interpreter.as_str()),
            ("sub-tool", self.sub_tool.as_str()),
            ("helper", self.helper.as_str()),
        ]
        .into_iter()
        .filter(|(_, path)| !Path::new(path).exists())
        .collect()
    }
}
