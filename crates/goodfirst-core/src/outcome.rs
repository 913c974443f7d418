// Turns a spawned task's fate into a plain Result
use std::any::Any;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

/// Why a spawned task produced no value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    #[error("task panicked: {0}")]
    Panicked(String),

    #[error("task was cancelled")]
    Cancelled,
}

impl From<JoinError> for TaskFailure {
    fn from(err: JoinError) -> Self {
        if err.is_cancelled() {
            return TaskFailure::Cancelled;
        }

        match err.try_into_panic() {
            Ok(payload) => TaskFailure::Panicked(panic_message(payload.as_ref())),
            Err(_) => TaskFailure::Cancelled,
        }
    }
}

/// Await a task, converting a panic or cancellation into `Err`.
///
/// A panicking task never propagates past this point; the caller gets the
/// panic message as a value instead.
pub async fn settle<T>(handle: JoinHandle<T>) -> Result<T, TaskFailure> {
    handle.await.map_err(TaskFailure::from)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
