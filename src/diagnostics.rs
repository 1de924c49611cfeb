use crate::launcher::LaunchPlan;
use std::io::{self, Write};

/// Write the resolved root, command line and (optionally) environment of
/// `plan` to `out`.
///
/// The environment section echoes every variable verbatim, secrets included.
pub fn dump(out: &mut dyn Write, plan: &LaunchPlan, with_env: bool) -> io::Result<()> {
    writeln!(out, "*** root")?;
    writeln!(out, "{}", plan.root)?;
    writeln!(out, "*** command line")?;
    writeln!(out, "{}", plan.command)?;
    if with_env {
        writeln!(out, "*** environment")?;
        for entry in plan.environment.entries() {
            writeln!(out, "{entry}")?;
        }
    }
    out.flush()
}
