pub mod action;
pub mod command;

pub use action::{ActionQueue, ActionStatus, QueuedAction};
pub use command::{parse_session_line, SessionCommand};
