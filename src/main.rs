//! remanifest CLI entry point

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use remanifest::cli::commands::convert::{run_convert, ConvertOptions};
use remanifest::core::manifest::RemoteSpec;

#[derive(Parser)]
#[command(name = "remanifest")]
#[command(author, version, about = "Reduce a git-repo manifest to its project list", long_about = None)]
struct Cli {
    /// URL (or local path) of the source manifest
    url: String,

    /// Output path
    out: PathBuf,

    /// Remote URL to declare in the output manifest
    #[arg(long, requires = "remotename")]
    remote: Option<String>,

    /// Name for the declared remote
    #[arg(long, requires = "remote")]
    remotename: Option<String>,

    /// Network timeout in seconds (unbounded if omitted)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let remote = match (cli.remote, cli.remotename) {
        (Some(fetch), Some(name)) => Some(RemoteSpec { name, fetch }),
        _ => None,
    };

    let options = ConvertOptions {
        source: cli.url,
        out: cli.out,
        remote,
        timeout: cli.timeout.map(Duration::from_secs),
    };

    run_convert(&options).await
}
