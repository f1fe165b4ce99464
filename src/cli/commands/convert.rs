//! Manifest conversion command
//!
//! Fetches a source manifest, reduces it, and writes the result.

use crate::cli::output::Output;
use crate::core::manifest::{RemoteSpec, XmlManifest};
use crate::net;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Resolved invocation options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Source manifest: an http(s) URL or a local file path
    pub source: String,
    /// Output file path (overwritten if present)
    pub out: PathBuf,
    /// Remote declaration to inject, if any
    pub remote: Option<RemoteSpec>,
    /// Network timeout; unbounded when None
    pub timeout: Option<Duration>,
}

/// Fetch, reduce, and write a manifest.
pub async fn run_convert(options: &ConvertOptions) -> anyhow::Result<()> {
    let body = if net::is_http_url(&options.source) {
        let spinner = Output::spinner(&format!("Fetching {}", options.source));
        let body = net::fetch_manifest(&options.source, options.timeout).await?;
        spinner.finish_and_clear();
        body
    } else {
        debug!(path = %options.source, "reading local source manifest");
        std::fs::read_to_string(Path::new(&options.source))?
    };

    let source = XmlManifest::parse(&body)?;
    let reduced = source.reduce(options.remote.as_ref());
    let xml = reduced.to_xml_string()?;

    std::fs::write(&options.out, &xml)?;

    if let Some(remote) = &options.remote {
        Output::info(&format!(
            "Injected remote '{}' ({})",
            remote.name, remote.fetch
        ));
    }
    Output::success(&format!(
        "Written: {} ({} projects)",
        options.out.display(),
        reduced.projects.len()
    ));

    Ok(())
}
