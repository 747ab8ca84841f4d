//! Saga pattern orchestration for non-atomic multi-step operations.
//!
//! A saga pairs an ordered list of forward [`Action`]s with an ordered
//! list of [`Compensation`]s. Actions run one after another; the first
//! failure halts the run and triggers every registered compensation,
//! approximating transactional semantics across operations that share no
//! rollback mechanism (calls to independent services, for instance).
//!
//! Two policy flags shape the compensation pass:
//!
//! - [`Saga::parallel_compensation`] runs each compensation on its own
//!   thread, fire-and-forget. Failures in this mode are logged but never
//!   surfaced through the run result.
//! - [`Saga::continue_on_compensation_error`] tolerates individual
//!   sequential compensation failures instead of aborting the pass.
//!
//! Compensations execute in the order they were registered, not in
//! reverse; the list is flat and is not paired with individual actions.
//! Register compensations in reverse of their actions' order if LIFO
//! rollback is what you need.
//!
//! Cancellation and timeouts are cooperative. The execution context is a
//! caller-defined type passed by reference to every step; the
//! orchestrator never inspects it and never cancels an in-flight step.
//!
//! # Example
//!
//! ```
//! use saga_core::{Saga, SagaError, action_fn, compensation_fn};
//!
//! let result = Saga::<(), String>::new()
//!     .action(action_fn(|_: &()| Ok(())))
//!     .action(action_fn(|_: &()| Err("charge declined".to_string())))
//!     .compensation(compensation_fn(|_: &()| {
//!         // release the inventory reserved by the first action
//!         Ok(())
//!     }))
//!     .run(&());
//!
//! assert!(matches!(result, Err(SagaError::ActionFailed { index: 1, .. })));
//! ```

mod error;
mod saga;
mod step;

pub use error::SagaError;
pub use saga::Saga;
pub use step::{Action, Compensation, action_fn, compensation_fn};
