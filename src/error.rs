//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

/// Why a draft could not be committed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitRejected {
    #[error("Title is required")]
    EmptyTitle,
}

/// Failures of the reminder side channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Task {0} does not exist")]
    UnknownTask(TaskId),

    #[error("Task {0} has no reminder set")]
    ReminderDisabled(TaskId),

    #[error("Reminder delivery failed: {0}")]
    Delivery(String),
}

/// Failures of the identity collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("No user name configured; set [identity] user in the config file")]
    NoUser,
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
