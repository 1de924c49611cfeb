use env_logger::Env;
use mclone_launcher::{LaunchError, Launcher};

fn main() {
    env_logger::Builder::from_env(Env::new().filter_or("MCLONE_LAUNCHER_LOG", "warn"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let code = match Launcher::default().run(std::env::args_os(), std::env::vars_os()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mclone: {err:#}");
            err.downcast_ref::<LaunchError>()
                .map_or(1, LaunchError::exit_code)
        }
    };
    std::process::exit(code);
}
