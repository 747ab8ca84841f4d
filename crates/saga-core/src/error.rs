use std::fmt::Debug;

use thiserror::Error;

/// Error from running a saga.
///
/// Steps are opaque to the orchestrator, so failures are identified by
/// position in registration order rather than by name.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// An action failed and the compensation pass completed without a
    /// fatal error (or ran in fire-and-forget parallel mode).
    #[error("action at index {index} failed")]
    ActionFailed {
        /// Position of the failing action in registration order.
        index: usize,
        /// The error returned by the action.
        #[source]
        source: E,
    },

    /// An action failed and the sequential compensation pass then failed
    /// fatally. Both errors are carried as distinct fields.
    #[error(
        "action at index {action_index} failed, then compensation at index {compensation_index} failed"
    )]
    CompensationFailed {
        /// Position of the failing action in registration order.
        action_index: usize,
        /// The error returned by the action.
        action_error: E,
        /// Position of the failing compensation in registration order.
        compensation_index: usize,
        /// The error returned by the compensation.
        compensation_error: E,
    },
}

impl<E: Debug> SagaError<E> {
    /// The error from the action that triggered the compensation pass.
    ///
    /// Present on both variants; never a compensation error.
    #[must_use]
    pub fn action_error(&self) -> &E {
        match self {
            Self::ActionFailed { source, .. } => source,
            Self::CompensationFailed { action_error, .. } => action_error,
        }
    }

    /// The fatal compensation error, if the compensation pass failed.
    #[must_use]
    pub fn compensation_error(&self) -> Option<&E> {
        match self {
            Self::ActionFailed { .. } => None,
            Self::CompensationFailed {
                compensation_error, ..
            } => Some(compensation_error),
        }
    }
}
