mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::File { file, pattern } => {
            commands::search::run_file(config, file, pattern)
        }
        Commands::Dir { file, pattern } => {
            commands::search::run_dir(config, file, pattern)
        }
        Commands::Root { workspace, pattern } => {
            commands::search::run_root(config, workspace, pattern)
        }
        Commands::Install => commands::install::run(config),
        Commands::Doctor { json } => commands::doctor::run(config, cli.verbose, json),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
