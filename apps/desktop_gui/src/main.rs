use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use client_core::{StudioClient, DEFAULT_SERVER_URL};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::StudioApp;

#[derive(Debug, Parser)]
#[command(name = "desktop_gui", about = "Topic to ideas to script desktop client")]
struct Args {
    /// Base URL of the generation server.
    #[arg(long, env = "STUDIO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Per-request timeout; script generation can take a while.
    #[arg(long, default_value_t = 120)]
    request_timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let client = StudioClient::new(
        &args.server_url,
        Duration::from_secs(args.request_timeout_secs),
    )
    .context("failed to configure generation client")?;
    let server_url = client.server_url().to_string();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Script Studio")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Script Studio",
        options,
        Box::new(move |_cc| Ok(Box::new(StudioApp::new(cmd_tx, ui_rx, server_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
