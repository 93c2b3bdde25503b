//! Easel Developer Rig
//!
//! Runs the bridge against a file-backed host so the configuration page and
//! viewer protocol can be exercised without the real extension host.
//!
//! # Usage
//!
//! ```bash
//! # Broadcaster configuration page, default store
//! easel-rig
//!
//! # Viewer overlay against a scratch store
//! easel-rig --variant viewer --store /tmp/easel/broadcaster.json
//!
//! # Feed a save and watch the change come back
//! echo '{"port":"saveConfig","payload":{"selectedColors":[],"colors":["green"],"tools":[]}}' \
//!     | RUST_LOG=debug easel-rig
//! ```
//!
//! Input is JSON lines on stdin (see [`input`]). Every message the bridge
//! pushes into the UI is printed as one JSON line on stdout; logs go to
//! stderr.
//!
//! # Environment Variables
//!
//! - `EASEL_CONFIG`: settings file path
//! - `EASEL_VARIANT`: `config` or `viewer`
//! - `EASEL_STORE_PATH`: broadcaster record file
//! - `RUST_LOG`: log filter (trace, debug, info, warn, error)

mod file_host;
mod input;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use easel_bridge_core::{
    load_settings_from_path, Bridge, ExtensionVariant, HostEvent, InProcessUiChannel,
    SettingsOverrides, UiEvent, UiMessage,
};

use crate::file_host::FileHost;
use crate::input::{parse_line, RigInput};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "easel-rig")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Which UI to serve: `config` or `viewer`
    #[arg(short = 'v', long, value_parser = parse_variant)]
    variant: Option<ExtensionVariant>,

    /// File backing the broadcaster record
    #[arg(short = 's', long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Settings file
    #[arg(short = 'c', long, env = "EASEL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(short = 'l', long, env = "EASEL_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn parse_variant(value: &str) -> Result<ExtensionVariant, String> {
    value.parse()
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(format!(
            "easel_rig={level},easel_bridge_core={level},easel={level}"
        ))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let settings_path = args
        .config
        .clone()
        .or_else(easel_bridge_core::default_settings_path);
    let mut settings = load_settings_from_path(settings_path).context("Failed to load settings")?;

    let mut overrides = SettingsOverrides::new();
    if let Some(variant) = args.variant {
        overrides = overrides.with_variant(variant);
    }
    if let Some(store) = args.store.clone() {
        overrides = overrides.with_store_path(store);
    }
    overrides.apply(&mut settings);

    let store_path = settings
        .store_path
        .clone()
        .context("No store path configured and no data directory available")?;

    let (host_tx, host_rx) = mpsc::unbounded_channel::<HostEvent>();
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (ui, ui_inbox) = InProcessUiChannel::new_pair();

    let host = Arc::new(FileHost::new(store_path));
    host.notify_on(&host_tx);

    info!(
        variant = %settings.variant,
        store = %host.path().display(),
        source = %settings.source(),
        "Starting easel rig"
    );

    let bridge = Bridge::from_settings(Arc::clone(&host), ui, &settings);

    // The host fires at least once after the record is readable
    host_tx
        .send(HostEvent::ConfigurationChanged)
        .context("Bridge event channel closed before start")?;

    let printer = tokio::spawn(print_ui_messages(ui_inbox));
    let reader = tokio::spawn(read_input(host_tx, ui_tx));

    // FileHost keeps the host source open; end of input ends the run
    bridge.run_until_ui_closed(host_rx, ui_rx).await;
    drop(bridge);

    if let Err(e) = reader.await.context("Input task panicked")? {
        error!(error = %e, "Input stopped with an error");
    }
    printer.await.context("Output task panicked")??;

    info!("Rig finished");
    Ok(())
}

/// Route stdin lines to the bridge until EOF
async fn read_input(
    host_tx: mpsc::UnboundedSender<HostEvent>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let sent = match parse_line(line_no, &line) {
            Ok(Some(RigInput::Ui(event))) => ui_tx.send(event).is_ok(),
            Ok(Some(RigInput::Host(event))) => host_tx.send(event).is_ok(),
            Ok(None) => true,
            Err(e) => {
                warn!(error = %e, "Skipping input line");
                true
            }
        };
        if !sent {
            break;
        }
    }

    info!(lines = line_no, "Input closed");
    Ok(())
}

/// Print every UI-bound message as a JSON line
async fn print_ui_messages(
    mut inbox: mpsc::UnboundedReceiver<UiMessage>,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    while let Some(message) = inbox.recv().await {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }

    Ok(())
}
