//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::InteractionController;

/// Queues `cmd` for the backend worker. If the queue cannot take it, the
/// request is failed immediately so the controller leaves Loading.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    controller: &mut InteractionController,
) {
    let cmd_name = cmd.name();
    let request_id = cmd.request_id();
    let context = cmd.error_context();

    let failure = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, request_id, "queued ui->backend command");
            return;
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "Backend command processor disconnected (possible startup/runtime failure)"
        }
    };
    tracing::warn!(command = cmd_name, request_id, failure, "failed to queue command");
    controller.apply(UiEvent::request_failed(request_id, context, failure));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::reducer::ToastKind;
    use crossbeam_channel::bounded;

    #[test]
    fn queued_command_keeps_controller_loading() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let mut controller = InteractionController::new();
        let cmd = controller.submit_topic("rivers").expect("submit");

        dispatch_backend_command(&cmd_tx, cmd.clone(), &mut controller);

        assert_eq!(cmd_rx.try_recv().expect("queued"), cmd);
        assert!(controller.is_loading());
    }

    #[test]
    fn disconnected_worker_fails_request() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        drop(cmd_rx);
        let mut controller = InteractionController::new();
        let cmd = controller.submit_topic("rivers").expect("submit");

        dispatch_backend_command(&cmd_tx, cmd, &mut controller);

        assert!(!controller.is_loading());
        let toast = controller.toast().expect("toast");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Error generating ideas. Please try again.");
    }

    #[test]
    fn full_queue_fails_script_request() {
        let (cmd_tx, _cmd_rx) = bounded::<BackendCommand>(1);
        cmd_tx
            .try_send(BackendCommand::GenerateIdeas {
                request_id: 99,
                topic: "filler".to_string(),
            })
            .expect("fill queue");

        let mut controller = InteractionController::new();
        let cmd = controller.submit_topic("rivers").expect("submit");
        controller.apply(UiEvent::IdeasGenerated {
            request_id: cmd.request_id(),
            outcome: Ok(vec!["A".to_string()]),
        });
        let cmd = controller.select_card(0).expect("select");

        dispatch_backend_command(&cmd_tx, cmd, &mut controller);

        assert!(!controller.is_loading());
        assert_eq!(controller.selected_index(), None);
        assert_eq!(
            controller.toast().map(|toast| toast.message.as_str()),
            Some("Error generating script. Please try again.")
        );
    }
}
