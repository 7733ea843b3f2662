use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use eventmi_server::cli_error::CliError;
use log::{error, warn};
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    if let Err(e) = run_command(args.command) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_command(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve => {
            eventmi_server::cli::database_migration::check_migration_state()
                .map_err(|e| CliError::DatabaseMigrationError(e.to_string()))?;
            eventmi_server::web::serve()
        }
        Command::MigrateDb => eventmi_server::cli::database_migration::run_migrations()
            .map_err(|e| CliError::DatabaseMigrationError(e.to_string())),
        Command::ListEvents => eventmi_server::cli::manage_events::print_event_list(),
        Command::LoadData { path } => eventmi_server::cli::file_io::load_events_from_file(&path),
        Command::ExportData { path } => eventmi_server::cli::file_io::export_events_to_file(&path),
    }
}

/// Eventmi: list, add, edit and delete events in your browser
#[derive(Debug, Parser)]
#[clap(name = "eventmi", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the Eventmi web application
    Serve,
    /// Apply all pending database schema migrations
    MigrateDb,
    /// Print a table of all events in the database
    ListEvents,
    /// Import events from a JSON file
    LoadData {
        /// The path of the JSON file to read from
        path: PathBuf,
    },
    /// Export all events to a JSON file
    ExportData {
        /// The path of the JSON file to write to
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
