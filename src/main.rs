//! Wires an AWS client into a registry and runs the image uploader against it.
//!
//! Logs go to stderr; stdout carries only the upload line.

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dep_registry::{aws, global, images::Uploader, RegistryApi, SharedRegistry};

#[derive(Debug, Parser)]
#[command(name = "dep-registry", version, about)]
struct Args {
    /// Access key handed to the AWS client
    #[arg(long, env = "DEP_REGISTRY_AWS_KEY", default_value = "my key")]
    aws_key: String,

    /// Secret handed to the AWS client
    #[arg(long, env = "DEP_REGISTRY_AWS_SECRET", default_value = "my secret")]
    aws_secret: String,

    /// Wire through the process-wide registry instead of an explicit one
    #[arg(long)]
    global: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let aws_api = aws::Api::new(args.aws_key, args.aws_secret);

    let uploader = if args.global {
        info!("wiring dependencies into the global registry");
        global::register(aws_api).context("failed to register AWS client")?;
        Uploader::from_global().context("failed to build uploader")?
    } else {
        info!("wiring dependencies into an explicit registry");
        let deps = SharedRegistry::new();
        deps.register(aws_api)
            .context("failed to register AWS client")?;
        debug!(?deps, "registry wired");
        Uploader::new(&deps).context("failed to build uploader")?
    };

    println!("{}", uploader.upload());
    Ok(())
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
