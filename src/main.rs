use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use defectscore::config::Config;
use defectscore::matching::MatchingEngine;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with matching parameters. Flags given on the command line win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every participant run found in a directory.
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Score a single run from explicit file paths.
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Analyze(args) => (
            &args.config,
            matches.subcommand_matches("analyze").unwrap_or(&matches),
        ),
        Commands::Inspect(args) => (
            &args.config,
            matches.subcommand_matches("inspect").unwrap_or(&matches),
        ),
    };

    let config = match &cli.config_file {
        Some(path) => {
            info!("Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };

    let engine = MatchingEngine::new(&config.matching).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    info!("Selection threshold: {}", engine.threshold());

    let ok = match cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, &engine),
        Commands::Inspect(args) => match cmd::inspect::run(args, &engine) {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        },
    };

    if !ok {
        process::exit(1);
    }
}
