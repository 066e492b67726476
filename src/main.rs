//! staticpub binary entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use staticpub::config::{DEFAULT_CONFIG_PATH, SiteConfig};
use staticpub::keys::{DEFAULT_KEY_BITS, KeyPairPaths, generate_keypair};
use staticpub::site::SiteBuilder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, clap::Subcommand)]
enum Task {
    /// Generate the actor, WebFinger and NodeInfo files.
    Build {
        /// Configuration file (TOML, JSON or YAML).
        #[arg(long, env = "STATICPUB_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Create the RSA key pair published with the actor.
    Keygen {
        /// Where to write the public key.
        #[arg(long, default_value = "./public.pem")]
        public: PathBuf,
        /// Where to write the private key.
        #[arg(long, default_value = "./private.pem")]
        private: PathBuf,
        /// RSA modulus size.
        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,
        /// Replace existing key files.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Whether to print verbose logs.
    #[arg(long)]
    verbose: bool,
    #[command(subcommand)]
    task: Task,
}

/// Initialize tracing/logging
///
/// Logs go to stderr. `RUST_LOG` overrides the default filter and
/// `STATICPUB__LOGGING__FORMAT=json` switches to JSON output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "staticpub=debug"
    } else {
        "staticpub=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let log_format =
        std::env::var("STATICPUB__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(task: Task) -> anyhow::Result<()> {
    match task {
        Task::Build { config } => {
            let config = SiteConfig::load(&config)?;
            let builder = SiteBuilder::new(config)?;
            let report = builder.build().await?;
            tracing::info!(
                files = report.written.len(),
                publish_dir = %builder.config().publish_dir.display(),
                "Site generated"
            );
        }
        Task::Keygen {
            public,
            private,
            bits,
            force,
        } => {
            generate_keypair(&KeyPairPaths { public, private }, bits, force).await?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args.task).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
