//! `streamdashctl`: follow a Jellyfin server's active sessions from a
//! terminal.

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use streamdash_config::{ConfigLoad, ConfigLoader, ConfigOverrides, DashboardConfig};
use streamdash_core::dashboard::DashboardView;
use streamdash_core::poller::{ActiveSessions, SnapshotPoller};
use streamdash_core::source::HttpSessionSource;
use streamdash_model::ServerId;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "streamdashctl=info,streamdash_core=info,streamdash_config=info";

#[derive(Parser)]
#[command(
    name = "streamdashctl",
    version,
    about = "Watch active Jellyfin sessions from the terminal"
)]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the active sessions and print them whenever they change
    Watch {
        /// Exit after the first complete snapshot
        #[arg(long)]
        once: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Statistics API origin serving /api/Sessions
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    /// Server identifier to watch
    #[arg(long, value_name = "ID")]
    server_id: Option<i64>,
    /// Jellyfin origin used for artwork URLs
    #[arg(long, value_name = "URL")]
    server_url: Option<String>,
    /// Poll interval, e.g. 500ms or 2s
    #[arg(long, value_name = "DURATION", value_parser = parse_interval)]
    interval: Option<Duration>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        ConfigOverrides {
            api_base_url: args.api_url,
            server_id: args.server_id.map(ServerId),
            server_url: args.server_url,
            interval: args.interval,
        }
    }
}

fn parse_interval(raw: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(raw.trim())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Watch { once, overrides } => {
            let load = load_config(cli.config, overrides)?;
            watch(load.config, once).await
        }
        Command::Config { overrides } => {
            let load = load_config(cli.config, overrides)?;
            let rendered = load
                .config
                .to_toml()
                .context("failed to render configuration")?;
            println!("# source: {}", load.source);
            print!("{rendered}");
            Ok(())
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    overrides: OverrideArgs,
) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_config_path(path);
    }
    let mut load = loader.load().context("failed to load configuration")?;

    let cli_overrides = ConfigOverrides::from(overrides);
    if !cli_overrides.is_empty() {
        load.config.apply(&cli_overrides);
        load.config
            .validate()
            .context("command-line overrides produced an invalid configuration")?;
        load.overrides = load.overrides.merge(cli_overrides);
    }
    Ok(load)
}

async fn watch(config: DashboardConfig, once: bool) -> Result<()> {
    let server = config.server();
    let poller_config = config.poller_config();
    let source =
        HttpSessionSource::new(&config.api_base_url, poller_config.request_timeout)
            .context("failed to build the session client")?;

    let poller = SnapshotPoller::new(Arc::new(source), poller_config);
    let mut view = ActiveSessions::new(poller);
    let mut updates = view.subscribe();
    view.mount(server.id);
    info!(
        server = %server.display_name(),
        api = %config.api_base_url,
        interval = ?poller_config.interval,
        "watching active sessions"
    );

    let mut last_rendered: Option<String> = None;
    loop {
        tokio::select! {
            changed = updates.changed() => {
                changed.context("session view closed unexpectedly")?;
                let state = updates.borrow_and_update().state.clone();
                let dashboard = DashboardView::from_state(
                    &state,
                    &server,
                    &config.artwork,
                    Utc::now(),
                );
                let text = render::render(&dashboard, &server);
                if last_rendered.as_deref() != Some(text.as_str()) {
                    println!("{text}");
                    last_rendered = Some(text);
                }
                if once && !state.is_pending() {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    warn!("failed to listen for ctrl-c: {err}");
                }
                break;
            }
        }
    }

    view.unmount();
    Ok(())
}
