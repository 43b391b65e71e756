//! Backend commands queued from UI to backend worker.

use crate::controller::events::{RequestId, UiErrorContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    GenerateIdeas { request_id: RequestId, topic: String },
    GenerateScript { request_id: RequestId, idea: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GenerateIdeas { .. } => "generate_ideas",
            BackendCommand::GenerateScript { .. } => "generate_script",
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            BackendCommand::GenerateIdeas { request_id, .. }
            | BackendCommand::GenerateScript { request_id, .. } => *request_id,
        }
    }

    pub fn error_context(&self) -> UiErrorContext {
        match self {
            BackendCommand::GenerateIdeas { .. } => UiErrorContext::GenerateIdeas,
            BackendCommand::GenerateScript { .. } => UiErrorContext::GenerateScript,
        }
    }
}
