//! Numera - remote numeral service
//!
//! `numera serve` runs the TCP server. `numera convert` and `numera arif`
//! send a single request to a running server and print the reply.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numera_core::{FractionStyle, Operator, Radix};
use numera_net::{ArithmeticRequest, Client, ConvertRequest, Request, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Base conversion and arithmetic over TCP")]
struct Cli {
    /// Configuration file (default: numera.toml in the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the server until interrupted.
    Serve {
        /// Listen host.
        #[arg(long)]
        host: Option<String>,
        /// Listen port.
        #[arg(long)]
        port: Option<u16>,
        /// Fractional digits in results.
        #[arg(long)]
        precision: Option<u32>,
        /// Mark repeating fractions with parentheses instead of truncating.
        #[arg(long)]
        repeating: bool,
    },
    /// Convert a number between bases.
    Convert {
        #[command(flatten)]
        target: Target,
        /// Number to convert, e.g. FF or 1.5
        #[arg(allow_hyphen_values = true)]
        literal: String,
        /// Base the number is written in.
        source: Radix,
        /// Base to convert to.
        target_base: Radix,
    },
    /// Apply + - * / to two numbers written in the same base.
    Arif {
        #[command(flatten)]
        target: Target,
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        #[arg(allow_hyphen_values = true)]
        rhs: String,
        base: Radix,
        /// One of + - * /
        #[arg(allow_hyphen_values = true)]
        op: Operator,
    },
}

/// Server to send a request to
#[derive(clap::Args, Debug)]
struct Target {
    /// Server host.
    #[arg(long)]
    host: Option<String>,
    /// Server port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    init_tracing(&config.log_level);

    match cli.command {
        Command::Serve {
            host,
            port,
            precision,
            repeating,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(precision) = precision {
                config.format.precision = precision;
            }
            if repeating {
                config.format.style = FractionStyle::Repeating;
            }
            config.validate()?;
            serve(&config).await
        }
        Command::Convert {
            target,
            literal,
            source,
            target_base,
        } => {
            let request = Request::Convert(ConvertRequest {
                literal,
                source,
                target: target_base,
            });
            send(&mut config, target, &request).await
        }
        Command::Arif {
            target,
            lhs,
            rhs,
            base,
            op,
        } => {
            let request = Request::Arithmetic(ArithmeticRequest {
                lhs,
                rhs,
                radix: base,
                op,
            });
            send(&mut config, target, &request).await
        }
    }
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn serve(config: &Config) -> Result<()> {
    let server_config = config.server_config()?;
    let server = Server::start(server_config.clone())
        .await
        .with_context(|| format!("failed to listen on {}", server_config.bind))?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to wait for interrupt signal")?;

    server.shutdown();
    server.wait().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn send(config: &mut Config, target: Target, request: &Request) -> Result<()> {
    if let Some(host) = target.host {
        config.client.host = host;
    }
    if let Some(port) = target.port {
        config.client.port = port;
    }

    let client = Client::new(config.client_config());
    let reply = client
        .send(request)
        .await
        .with_context(|| format!("request to {} failed", config.client_config().addr))?;
    println!("{}", reply);
    Ok(())
}
