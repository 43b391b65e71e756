//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::StudioClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task so a
/// slow script generation never blocks the command queue.
pub fn launch(
    client: StudioClient,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(UiError::request(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        tracing::info!(server_url = %client.server_url(), "backend worker ready");
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(&client, cmd).await;
                    deliver(ui_tx, event).await;
                });
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    })
}

/// Waits for room in the UI queue. The result is only lost once the UI side
/// has hung up.
async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent) {
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => tracing::warn!("ui event queue closed; dropping backend result"),
        Err(err) => tracing::error!("ui event delivery task failed: {err}"),
    }
}

async fn run_command(client: &StudioClient, cmd: BackendCommand) -> UiEvent {
    let command = cmd.name();
    let context = cmd.error_context();
    let to_ui_error = |err: client_core::RequestError| {
        tracing::warn!(command, "backend request failed: {err}");
        UiError::request(context, err.to_string())
    };

    match cmd {
        BackendCommand::GenerateIdeas { request_id, topic } => UiEvent::IdeasGenerated {
            request_id,
            outcome: client.generate_ideas(&topic).await.map_err(to_ui_error),
        },
        BackendCommand::GenerateScript { request_id, idea } => UiEvent::ScriptGenerated {
            request_id,
            outcome: client.generate_script(&idea).await.map_err(to_ui_error),
        },
    }
}
