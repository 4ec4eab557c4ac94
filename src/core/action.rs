//! Notifications raised by stateful components

use std::sync::mpsc::Sender;

use serde::Serialize;

/// Status attached to a queued notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionStatus {
    EventWarn,
    Success,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::EventWarn => "eventWarn",
            ActionStatus::Success => "success",
        }
    }
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedAction {
    pub action: String,
    pub message: String,
    pub status: ActionStatus,
}

impl QueuedAction {
    pub fn new(action: impl Into<String>, message: impl Into<String>, status: ActionStatus) -> Self {
        Self {
            action: action.into(),
            message: message.into(),
            status,
        }
    }
}

/// Fire-and-forget notification sink
pub trait ActionQueue {
    fn queue_action(&self, action: QueuedAction);
}

impl ActionQueue for Sender<QueuedAction> {
    fn queue_action(&self, action: QueuedAction) {
        // Receiver gone means nobody is listening any more.
        let _ = self.send(action);
    }
}

impl<F> ActionQueue for F
where
    F: Fn(QueuedAction),
{
    fn queue_action(&self, action: QueuedAction) {
        self(action)
    }
}
