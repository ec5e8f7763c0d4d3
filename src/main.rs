use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use jotter::{App, Cli, Config, FileStore, Notebook, Result};

pub fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    info!("Using data directory {}", config.data_dir.display());
    let notebook = Notebook::open(FileStore::new(config.data_dir.clone()));

    let mut app = App::new(notebook, config, config_path, cli.verbose);
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
