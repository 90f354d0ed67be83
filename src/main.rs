use clap::Parser;
use env_logger::Env;

use photo_ascii_bot::cli::{self, Args, Command};

/// Install the logger. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}

#[tokio::main]
async fn main() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();

    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = args.config.as_deref();

    let result = match args.command.unwrap_or(Command::Run) {
        Command::Run => cli::run_bot(config_path).await,
        Command::Convert {
            image,
            width,
            fenced,
        } => cli::convert_image(&image, width, fenced).map(|art| println!("{}", art)),
        Command::Config { action } => cli::handle_config_action(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
