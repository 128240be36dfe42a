use clap::Parser;
use focusflow::cli::commands::Cli;
use focusflow::cli::handlers::{self, Context};
use focusflow::io::{config_path, load_config};

/// Log to stderr so stdout stays clean for command output. `RUST_LOG` wins
/// over the configured level.
fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let source = config_path(cli.config.as_deref());
    let config = match load_config(source.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.log.level);
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file, using defaults"),
    }

    let ctx = Context::new(config, cli.json);
    if let Err(e) = handlers::dispatch(cli.command, &ctx) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
