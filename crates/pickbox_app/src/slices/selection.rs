//! Selected value and submission slice

use crate::config::MessageMode;

/// Kind of a logged message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One entry of the message log
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// The single selected value shared by every widget, plus submission status
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub value: Option<String>,
    pub submitting: bool,
    /// Latest success message
    pub message: Option<String>,
    /// Latest failure message
    pub error: Option<String>,
    /// Every message since the log was last cleared, oldest first
    pub messages: Vec<Notice>,
}

impl SelectionState {
    /// Select `value` (or nothing). The latest message is dropped; the log stays.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
        self.message = None;
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn clear_messages(&mut self) {
        self.message = None;
        self.error = None;
        self.messages.clear();
    }

    pub fn submit_pending(&mut self) {
        self.submitting = true;
        self.message = None;
        self.error = None;
    }

    pub fn submit_fulfilled(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.submitting = false;
        self.error = None;
        self.messages.push(Notice::success(message.clone()));
        self.message = Some(message);
    }

    pub fn submit_rejected(&mut self, error: impl Into<String>) {
        let error = error.into();
        self.submitting = false;
        self.message = None;
        self.messages.push(Notice::error(error.clone()));
        self.error = Some(error);
    }

    /// Messages to show under `mode`
    pub fn visible_messages(&self, mode: MessageMode) -> Vec<Notice> {
        match mode {
            MessageMode::Stack => self.messages.clone(),
            MessageMode::Single => self
                .error
                .clone()
                .map(Notice::error)
                .or_else(|| self.message.clone().map(Notice::success))
                .into_iter()
                .collect(),
        }
    }
}
