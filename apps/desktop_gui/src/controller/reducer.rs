//! Interaction state machine for the topic → ideas → script flow.
//!
//! The controller never performs I/O itself. Actions that need the backend
//! return a [`BackendCommand`] for the caller to queue, and results come back
//! through [`InteractionController::apply`]. At most one request is in flight
//! per controller; responses carrying any other request id are discarded.

use std::time::{Duration, Instant};

use shared::domain::{idea_label, Topic};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{RequestId, UiError, UiEvent};

pub const TOAST_DURATION: Duration = Duration::from_secs(3);
pub const IDEAS_LOADING_LABEL: &str = "Generating creative ideas...";
pub const SCRIPT_LOADING_LABEL: &str = "Creating your amazing script...";
pub const COPY_SUCCESS_MESSAGE: &str = "Script copied to clipboard!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    IdeasShown,
    ScriptShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Ideas,
    Script,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaCard<'a> {
    pub index: usize,
    pub label: String,
    pub text: &'a str,
    pub selected: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub ideas: Vec<String>,
    pub script: String,
}

/// Why an action did not produce a backend command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("topic is empty")]
    EmptyTopic,
    #[error("request {0} is still in flight")]
    Busy(RequestId),
    #[error("no idea at index {0}")]
    NoSuchIdea(usize),
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Ideas,
    Script { previous_selection: Option<usize> },
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    id: RequestId,
    kind: PendingKind,
    label: &'static str,
}

#[derive(Debug)]
pub struct InteractionController {
    pub topic_input: String,
    session: SessionState,
    ideas_visible: bool,
    script_visible: bool,
    selected: Option<usize>,
    pending: Option<PendingRequest>,
    next_request_id: RequestId,
    toast: Option<Toast>,
    scroll_request: Option<ScrollTarget>,
    ideas_revealed_at: Option<Instant>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            topic_input: String::new(),
            session: SessionState::default(),
            ideas_visible: false,
            script_visible: false,
            selected: None,
            pending: None,
            next_request_id: 1,
            toast: None,
            scroll_request: None,
            ideas_revealed_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.script_visible {
            Phase::ScriptShown
        } else if self.ideas_visible {
            Phase::IdeasShown
        } else {
            Phase::Idle
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ideas_visible(&self) -> bool {
        self.ideas_visible
    }

    pub fn script_visible(&self) -> bool {
        self.script_visible
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn loading_label(&self) -> Option<&'static str> {
        self.pending.map(|pending| pending.label)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn ideas_revealed_at(&self) -> Option<Instant> {
        self.ideas_revealed_at
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollTarget> {
        self.scroll_request.take()
    }

    pub fn idea_cards(&self) -> impl Iterator<Item = IdeaCard<'_>> + '_ {
        self.session
            .ideas
            .iter()
            .enumerate()
            .map(move |(index, text)| IdeaCard {
                index,
                label: idea_label(index),
                text,
                selected: self.selected == Some(index),
            })
    }

    /// Validates `topic` and, if accepted, enters Loading and returns the idea
    /// request to queue.
    pub fn submit_topic(&mut self, topic: &str) -> Result<BackendCommand, ActionRejected> {
        let Some(topic) = Topic::parse(topic) else {
            let err = UiError::validation("topic is empty after trimming whitespace");
            self.show_error(&err);
            return Err(ActionRejected::EmptyTopic);
        };
        self.ensure_idle()?;

        let request_id = self.begin(PendingKind::Ideas, IDEAS_LOADING_LABEL);
        info!(request_id, topic = %topic, "requesting ideas");
        Ok(BackendCommand::GenerateIdeas {
            request_id,
            topic: topic.into_inner(),
        })
    }

    /// Selects the card at `index` and returns the script request for its idea.
    pub fn select_card(&mut self, index: usize) -> Result<BackendCommand, ActionRejected> {
        let Some(idea) = self.session.ideas.get(index).cloned() else {
            return Err(ActionRejected::NoSuchIdea(index));
        };
        self.request_script(Some(index), idea)
    }

    /// Requests a script for `idea`. Any string is forwarded; the matching
    /// card, if one is displayed, becomes the selected card.
    pub fn select_idea(&mut self, idea: &str) -> Result<BackendCommand, ActionRejected> {
        let index = self.session.ideas.iter().position(|shown| shown == idea);
        self.request_script(index, idea.to_string())
    }

    fn request_script(
        &mut self,
        index: Option<usize>,
        idea: String,
    ) -> Result<BackendCommand, ActionRejected> {
        self.ensure_idle()?;

        let previous_selection = self.selected;
        self.selected = index;
        let request_id = self.begin(
            PendingKind::Script { previous_selection },
            SCRIPT_LOADING_LABEL,
        );
        info!(request_id, ?index, "requesting script");
        Ok(BackendCommand::GenerateScript { request_id, idea })
    }

    pub fn copy_script(&mut self, clipboard: &mut dyn ClipboardSink) -> Result<(), UiError> {
        match clipboard.set_text(&self.session.script) {
            Ok(()) => {
                self.show_toast(ToastKind::Success, COPY_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(reason) => {
                let err = UiError::clipboard(reason);
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Returns to Idle from any state. Any in-flight response is discarded
    /// when it arrives.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(request_id = pending.id, "reset abandons in-flight request");
        }
        self.topic_input.clear();
        self.session = SessionState::default();
        self.ideas_visible = false;
        self.script_visible = false;
        self.selected = None;
        self.ideas_revealed_at = None;
        self.scroll_request = Some(ScrollTarget::Top);
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::IdeasGenerated {
                request_id,
                outcome,
            } => {
                let Some(pending) = self.complete(request_id) else {
                    return;
                };
                debug_assert_eq!(pending.kind, PendingKind::Ideas);
                match outcome {
                    Ok(ideas) => {
                        info!(request_id, count = ideas.len(), "ideas received");
                        self.session.ideas = ideas;
                        self.session.script.clear();
                        self.selected = None;
                        self.ideas_visible = true;
                        self.script_visible = false;
                        self.ideas_revealed_at = Some(Instant::now());
                        self.scroll_request = Some(ScrollTarget::Ideas);
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            UiEvent::ScriptGenerated {
                request_id,
                outcome,
            } => {
                let Some(pending) = self.complete(request_id) else {
                    return;
                };
                match outcome {
                    Ok(script) => {
                        info!(request_id, chars = script.chars().count(), "script received");
                        self.session.script = script;
                        self.script_visible = true;
                        self.scroll_request = Some(ScrollTarget::Script);
                    }
                    Err(err) => {
                        if let PendingKind::Script { previous_selection } = pending.kind {
                            self.selected = previous_selection;
                        }
                        self.show_error(&err);
                    }
                }
            }
            UiEvent::BackendFailed(err) => {
                self.pending = None;
                self.show_error(&err);
            }
        }
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.shown_at) >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    fn ensure_idle(&self) -> Result<(), ActionRejected> {
        match self.pending {
            Some(pending) => {
                debug!(request_id = pending.id, "ignoring action while loading");
                Err(ActionRejected::Busy(pending.id))
            }
            None => Ok(()),
        }
    }

    fn begin(&mut self, kind: PendingKind, label: &'static str) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending = Some(PendingRequest { id, kind, label });
        id
    }

    fn complete(&mut self, request_id: RequestId) -> Option<PendingRequest> {
        match self.pending {
            Some(pending) if pending.id == request_id => self.pending.take(),
            _ => {
                debug!(request_id, "discarding stale response");
                None
            }
        }
    }

    fn show_error(&mut self, err: &UiError) {
        error!(
            category = ?err.category(),
            context = ?err.context(),
            detail = err.message(),
            "action failed"
        );
        self.show_toast(ToastKind::Error, err.toast_message());
    }

    fn show_toast(&mut self, kind: ToastKind, message: &str) {
        self.toast = Some(Toast {
            kind,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
