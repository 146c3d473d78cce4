use std::process::ExitCode;
use clap::Parser as ClapParser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use printscript::Config;

fn init_tracing(verbose: bool) {
    let default = if verbose { "printscript=debug" } else { "printscript=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let config: Config = Config::parse();
    init_tracing(config.verbose);

    match printscript::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.report());
            ExitCode::FAILURE
        },
    }
}
