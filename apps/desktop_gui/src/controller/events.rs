//! Backend→UI events and error modeling for the desktop GUI controller.

pub type RequestId = u64;

#[derive(Debug)]
pub enum UiEvent {
    IdeasGenerated {
        request_id: RequestId,
        outcome: Result<Vec<String>, UiError>,
    },
    ScriptGenerated {
        request_id: RequestId,
        outcome: Result<String, UiError>,
    },
    BackendFailed(UiError),
}

impl UiEvent {
    /// Failure event for a request that never produced a response.
    pub fn request_failed(
        request_id: RequestId,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        let err = UiError::request(context, message);
        match context {
            UiErrorContext::GenerateScript => UiEvent::ScriptGenerated {
                request_id,
                outcome: Err(err),
            },
            _ => UiEvent::IdeasGenerated {
                request_id,
                outcome: Err(err),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Request,
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SubmitTopic,
    GenerateIdeas,
    GenerateScript,
    CopyScript,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::SubmitTopic,
            message: message.into(),
        }
    }

    pub fn request(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Request,
            context,
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Clipboard,
            context: UiErrorContext::CopyScript,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    /// Diagnostic detail; goes to the log, not the toast.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn toast_message(&self) -> &'static str {
        match (self.category, self.context) {
            (UiErrorCategory::Validation, _) => "Please enter a topic first!",
            (UiErrorCategory::Clipboard, _) => "Failed to copy script",
            (UiErrorCategory::Request, UiErrorContext::GenerateScript) => {
                "Error generating script. Please try again."
            }
            (UiErrorCategory::Request, UiErrorContext::BackendStartup) => {
                "Backend worker failed to start. Please restart the app."
            }
            (UiErrorCategory::Request, _) => "Error generating ideas. Please try again.",
        }
    }
}
