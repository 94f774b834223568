//! Relay Lane CLI
//!
//! Entry point for the `relay-lane` command-line tool. The worker speaks
//! the JSON-lines codec; logs go to stderr so the stdio mode never mixes
//! diagnostics into the protocol stream.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_lane::LaneConfig;
use relay_worker::{Echo, JsonLineRelay, Worker};

#[derive(Parser)]
#[command(name = "relay-lane")]
#[command(about = "Echo worker for duplex relay channels", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to a relay endpoint and serve until the channel closes
    Serve {
        /// Relay endpoint (host:port), overrides the config file
        #[arg(long)]
        connect: Option<String>,

        /// Path to a lane config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Serve one relay session over stdin/stdout
    Stdio {
        /// Path to a lane config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Validate the configuration and print the effective values
    Check {
        /// Path to a lane config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve { connect, config } => {
            let mut config = LaneConfig::load_or_default(config.as_deref())?;
            if let Some(connect) = connect {
                config.connect = connect;
            }
            init_logging(&config);

            info!(endpoint = %config.connect, "connecting to relay");
            let relay = JsonLineRelay::connect(&config.connect, &config.worker_config())?;
            let mut worker = Worker::new(relay, Echo);
            worker.run()?;
            info!(num_execs = worker.num_execs(), "relay closed");
            Ok(())
        }

        Commands::Stdio { config } => {
            let config = LaneConfig::load_or_default(config.as_deref())?;
            init_logging(&config);

            let relay = JsonLineRelay::stdio(&config.worker_config());
            let mut worker = Worker::new(relay, Echo);
            worker.run()?;
            Ok(())
        }

        Commands::Check { config } => {
            let path = config.clone();
            let config = LaneConfig::load_or_default(config.as_deref())?;
            match path {
                Some(path) => println!("config file: {}", path.display()),
                None => println!("config file: (none, built-in defaults)"),
            }
            println!("connect = {}", config.connect);
            println!("max_frame_bytes = {}", config.max_frame_bytes);
            println!("log_filter = {}", config.log_filter);
            Ok(())
        }
    }
}

fn init_logging(config: &LaneConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
