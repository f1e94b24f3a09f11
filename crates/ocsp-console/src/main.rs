use clap::{Parser, Subcommand};
use ocsp_console::{Config, ConsoleError, Session};
use ocsp_proto::{DigestAlgorithm, NOT_AVAILABLE, hex_to_decimal, render_serial};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// OCSP Console - certificate revocation status checks (RFC 6960)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "ocsp-console")]
struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CertID digest algorithm: sha1 or sha256
    #[arg(long, global = true)]
    digest: Option<DigestAlgorithm>,

    /// Display offset for OCSP times, in minutes east of UTC
    #[arg(long, global = true, allow_negative_numbers = true)]
    offset_minutes: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a certificate's revocation status with its OCSP responder
    Check {
        /// Leaf certificate (PEM)
        leaf: PathBuf,
        /// Issuer certificate (PEM)
        issuer: PathBuf,
    },
    /// Convert certificate serial numbers
    Serial {
        #[command(subcommand)]
        conversion: SerialCommand,
    },
    /// Write an example configuration file
    InitConfig {
        /// Destination file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum SerialCommand {
    /// Decimal to uppercase hexadecimal
    ToHex { decimal: String },
    /// Hexadecimal to decimal
    ToDec { hex: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Command::Serial { conversion } => {
            let rendered = match conversion {
                SerialCommand::ToHex { decimal } => render_serial(decimal),
                SerialCommand::ToDec { hex } => {
                    hex_to_decimal(hex).unwrap_or_else(|| NOT_AVAILABLE.to_string())
                }
            };
            println!("{}", rendered);
            if rendered == NOT_AVAILABLE {
                process::exit(1);
            }
        }
        Command::InitConfig { file } => {
            if let Err(e) = Config::example().to_file(file) {
                eprintln!("{}", e);
                process::exit(1);
            }
            println!("Example configuration written to {}", file.display());
        }
        Command::Check { leaf, issuer } => {
            let config = match load_config(&cli) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            };

            init_tracing(config.log_level());
            debug!(
                session = %config.session_name,
                digest = %config.ocsp.digest_algorithm,
                offset_minutes = config.ocsp.display_offset_minutes,
                "configuration loaded"
            );

            let session = Session::new(config);
            match session.check_files(leaf, issuer).await {
                Ok(report) => {
                    for line in report.lines() {
                        println!("{}", line);
                    }
                    info!("check finished");
                }
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, ConsoleError> {
    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };
    Ok(config.with_overrides(cli.digest, cli.offset_minutes)?)
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
