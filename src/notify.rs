//! Reminder delivery.
//!
//! Sending a reminder is a side channel: the core decides *when* a reminder
//! may be sent, a `Notifier` decides *how*. The only implementation shipped
//! is `LogNotifier`, which records a tracing event and delivers nothing.

use tracing::info;

use crate::error::NotifyError;
use crate::task::Task;

/// Something that can deliver a reminder for a task.
pub trait Notifier {
    fn notify(&self, task: &Task) -> Result<(), NotifyError>;
}

/// Stub notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, task: &Task) -> Result<(), NotifyError> {
        info!(task = %task.id(), title = %task.title(), "reminder sent");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;
    use crate::task::TaskId;

    /// Notifier that remembers which tasks it was asked about.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: RefCell<Vec<TaskId>>,
        pub fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, task: &Task) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Delivery("offline".into()));
            }
            self.sent.borrow_mut().push(task.id());
            Ok(())
        }
    }
}
