mod aggregate;
mod cell;
mod cli;
mod db;
mod error;
mod fmt;
mod header;
mod importer;
mod models;
mod normalize;
mod pipeline;
mod reports;
mod settings;
mod workbook;

use clap::Parser;
use env_logger::Env;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import {
            file,
            user,
            year,
            dry_run,
            show_skipped,
        } => cli::import::run(&file, &user, year, dry_run, show_skipped),
        Commands::Report { user, year } => cli::report::run(&user, year),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
