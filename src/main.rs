use clap::Parser;
use lockbox::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { ref input } => {
            lockbox::cli::commands::init::execute(&cli, input.as_deref())
        }
        Commands::Cat { ref output } => {
            lockbox::cli::commands::cat::execute(&cli, output.as_deref())
        }
        Commands::Write { ref input } => {
            lockbox::cli::commands::write::execute(&cli, input.as_deref())
        }
        Commands::Rekey => lockbox::cli::commands::rekey::execute(&cli),
        Commands::Verify => lockbox::cli::commands::verify::execute(&cli),
        Commands::Info { json } => lockbox::cli::commands::info::execute(&cli, json),
        Commands::Completions { shell } => {
            lockbox::cli::commands::completions::execute(shell, &mut std::io::stdout())
        }
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries payload bytes for `cat`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "lockbox=info",
        _ => "lockbox=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
