//! Show what the mclone launcher would run, without running it.

use anyhow::{Context, Result};
use argh::FromArgs;
use env_logger::Env;
use mclone_launcher::{
    DefaultLocator, FixedLocator, InstallRoot, Launcher, Layout, Locator, ProcessSpawner,
    diagnostics,
};
use std::ffi::OsString;

#[derive(FromArgs)]
/// Print the installation root and child command line the mclone launcher
/// resolves, and check that every bundled component is present.
struct LayoutArgs {
    #[argh(option)]
    /// installation root to inspect instead of the directory holding this tool
    root: Option<String>,

    #[argh(switch, short = 'e')]
    /// also print the child environment, including every inherited variable
    env: bool,

    #[argh(positional, greedy)]
    /// arguments the launcher would forward
    args: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(Env::new().filter_or("MCLONE_LAUNCHER_LOG", "warn"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let args: LayoutArgs = argh::from_env();
    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mclone-layout: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run(args: LayoutArgs) -> Result<i32> {
    let locator: Box<dyn Locator> = match &args.root {
        Some(dir) => Box::new(FixedLocator(InstallRoot::from_dir(dir))),
        None => Box::new(DefaultLocator::default()),
    };
    let layout = Layout::from_build_env();
    let launcher = Launcher::new(locator, Box::new(ProcessSpawner)).with_layout(layout.clone());

    // argv[0] stands in for the launcher sitting next to this tool.
    let argv0 = std::env::args_os()
        .next()
        .unwrap_or_else(|| OsString::from("mclone"));
    let forwarded = std::iter::once(argv0).chain(args.args.into_iter().map(OsString::from));
    let plan = launcher
        .prepare(forwarded, std::env::vars_os())
        .context("cannot resolve the launch plan")?;

    let mut stdout = std::io::stdout().lock();
    diagnostics::dump(&mut stdout, &plan, args.env).context("cannot write the plan")?;

    let resolved = layout.resolve(&plan.root);
    let missing = resolved.missing();
    for (component, path) in &missing {
        eprintln!("missing {component}: {path}");
    }
    Ok(if missing.is_empty() { 0 } else { 1 })
}
