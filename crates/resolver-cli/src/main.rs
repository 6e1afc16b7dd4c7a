use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use stream_resolver::{
    ApiKey, HttpFetcher, ResolveMode, ResolveOptions, ResolverConfig, StreamResolver,
};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "resolver-cli",
    about = "Resolve playable audio stream metadata for a video id",
    version
)]
struct Cli {
    /// Video identifier to resolve (at least 11 characters).
    video_id: String,

    /// Platform API host for the key-rotation path.
    #[arg(long, env = "RESOLVER_API_HOST")]
    api_host: Option<String>,

    /// Comma-delimited rotating API keys for the platform host.
    #[arg(long, env = "RESOLVER_API_KEYS", hide_env_values = true)]
    api_keys: Option<String>,

    /// Preference-ordered mirror base URL (repeatable).
    #[arg(long = "mirror", env = "RESOLVER_MIRRORS", value_delimiter = ',')]
    mirrors: Vec<Url>,

    /// Mirror preferred for live-manifest discovery (repeatable).
    #[arg(long = "hls-mirror", env = "RESOLVER_HLS_MIRRORS", value_delimiter = ',')]
    hls_mirrors: Vec<Url>,

    /// Emergency fallback mirror, consulted only after every mirror failed.
    #[arg(long, env = "RESOLVER_FALLBACK")]
    fallback: Option<Url>,

    /// Two-letter country hint for the platform API.
    #[arg(long)]
    geo: Option<String>,

    /// Require a live-streaming manifest instead of audio variants.
    #[arg(long)]
    hls: bool,

    /// Speculative lookahead: skip the emergency fallback.
    #[arg(long)]
    prefetch: bool,

    /// Resolution strategy.
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Per-attempt request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Auto,
    Keys,
    Failover,
    Hls,
}

impl From<Mode> for ResolveMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => ResolveMode::Auto,
            Mode::Keys => ResolveMode::KeyRotation,
            Mode::Failover => ResolveMode::MirrorFailover,
            Mode::Hls => ResolveMode::HlsAggregate,
        }
    }
}

fn base_url(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_owned()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ResolverConfig {
        mirrors: cli.mirrors.iter().map(base_url).collect(),
        hls_mirrors: cli.hls_mirrors.iter().map(base_url).collect(),
        fallback: cli.fallback.as_ref().map(base_url),
        ..ResolverConfig::default()
    };
    if let Some(host) = cli.api_host {
        config.api_host = host;
    }
    if let Some(keys) = cli.api_keys.as_deref() {
        config.api_keys = ApiKey::parse_list(keys);
    }

    // The core imposes no per-fetch timeout; the client-level timeout is the
    // caller's wrapper against an unresponsive provider stalling the chain.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("failed to build http client")?;
    let resolver = StreamResolver::with_fetcher(config, Arc::new(HttpFetcher::new(client)));

    let options = ResolveOptions {
        prefetch: cli.prefetch,
        wants_hls: cli.hls,
        geo: cli.geo,
        mode: cli.mode.into(),
    };
    tracing::debug!(video_id = %cli.video_id, ?options, "resolving");

    let wants_aggregation =
        matches!(options.mode, ResolveMode::HlsAggregate) || (cli.hls && matches!(options.mode, ResolveMode::Auto));

    let (value, found) = if wants_aggregation {
        let aggregated = resolver.resolve_live(&cli.video_id).await;
        let found = aggregated.resolution.is_found();
        let value = serde_json::json!({
            "result": aggregated.resolution.to_value()?,
            "manifests": aggregated.manifests,
        });
        (value, found)
    } else {
        let resolution = resolver.resolve(&cli.video_id, &options).await;
        (resolution.to_value()?, resolution.is_found())
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{rendered}");

    if !found {
        std::process::exit(1);
    }
    Ok(())
}
