use std::fmt::Debug;
use std::thread;

use tracing::{error, warn};

use crate::error::SagaError;
use crate::step::{Action, Compensation};

/// Orchestrates a sequence of forward actions with compensating rollback.
///
/// Actions run in registration order and execution halts at the first
/// failure, which triggers the compensation pass. Compensations also run
/// in registration order, not in reverse. The compensation list is flat:
/// it is not paired with individual actions, and the whole list runs on
/// any action failure. Callers wanting classic LIFO rollback must
/// register compensations in the reverse of their actions' order.
///
/// Two policy flags shape the compensation pass:
///
/// - [`parallel_compensation`](Self::parallel_compensation): run each
///   compensation on its own thread, fire-and-forget, instead of
///   sequentially.
/// - [`continue_on_compensation_error`](Self::continue_on_compensation_error):
///   tolerate individual compensation failures instead of aborting the
///   pass at the first one.
///
/// A saga is configured once through chained by-value calls, run once,
/// and then gone: [`run`](Self::run) consumes it.
pub struct Saga<C, E> {
    parallel_compensation: bool,
    continue_on_compensation_error: bool,
    actions: Vec<Box<dyn Action<Context = C, Error = E>>>,
    compensations: Vec<Box<dyn Compensation<Context = C, Error = E>>>,
}

impl<C, E> Saga<C, E> {
    /// Create a saga with no actions and no compensations.
    ///
    /// Both policy flags start off: compensations run sequentially and a
    /// failing compensation aborts the pass. Running an empty saga
    /// succeeds without doing anything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parallel_compensation: false,
            continue_on_compensation_error: false,
            actions: Vec::new(),
            compensations: Vec::new(),
        }
    }

    /// Append a forward action. Actions run in the order they are added.
    #[must_use]
    pub fn action(mut self, action: impl Action<Context = C, Error = E> + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Append a compensation.
    ///
    /// Compensations run in the order they are added, independent of
    /// which action they logically undo.
    #[must_use]
    pub fn compensation(
        mut self,
        compensation: impl Compensation<Context = C, Error = E> + 'static,
    ) -> Self {
        self.compensations.push(Box::new(compensation));
        self
    }

    /// Run compensations concurrently, one thread each, instead of
    /// sequentially.
    ///
    /// Parallel compensation is fire-and-forget: completion is not
    /// awaited, there is no ordering between compensations, and failures
    /// are logged on the spawned thread but never surfaced through the
    /// run result, regardless of the error-tolerance flag. Callers that
    /// need guaranteed-complete parallel rollback must fan results back
    /// in themselves.
    #[must_use]
    pub fn parallel_compensation(mut self, parallel: bool) -> Self {
        self.parallel_compensation = parallel;
        self
    }

    /// Tolerate individual compensation failures.
    ///
    /// When set, a failing sequential compensation is logged and the
    /// pass moves on to the next one; the run still reports the original
    /// action failure. When unset (the default), the first failing
    /// sequential compensation aborts the pass and the run reports a
    /// [`SagaError::CompensationFailed`] carrying both errors.
    #[must_use]
    pub fn continue_on_compensation_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_compensation_error = continue_on_error;
        self
    }

    /// Execute the saga.
    ///
    /// Invokes each action in registration order with `ctx`. The first
    /// action failure stops the run, triggers the compensation pass with
    /// the same `ctx`, and classifies the outcome:
    ///
    /// - every action succeeded: `Ok(())`, compensations never run;
    /// - an action failed and the pass completed (or was parallel):
    ///   [`SagaError::ActionFailed`];
    /// - an action failed and the sequential pass aborted:
    ///   [`SagaError::CompensationFailed`].
    ///
    /// The context is passed through untouched; the orchestrator never
    /// checks it for cancellation and never cancels an in-flight step.
    /// The `Clone + Send + 'static` bounds exist so the parallel pass can
    /// hand each spawned thread its own copy.
    ///
    /// # Errors
    ///
    /// Returns [`SagaError::ActionFailed`] or
    /// [`SagaError::CompensationFailed`] as classified above. Errors are
    /// surfaced verbatim, never retried.
    pub fn run(self, ctx: &C) -> Result<(), SagaError<E>>
    where
        C: Clone + Send + 'static,
        E: Debug + 'static,
    {
        let Self {
            parallel_compensation,
            continue_on_compensation_error,
            actions,
            compensations,
        } = self;

        for (index, action) in actions.iter().enumerate() {
            if let Err(action_error) = action.act(ctx) {
                warn!(
                    action = index,
                    error = ?action_error,
                    "action failed, starting compensation pass"
                );

                let pass = if parallel_compensation {
                    spawn_compensations(compensations, ctx);
                    Ok(())
                } else {
                    run_compensations(&compensations, ctx, continue_on_compensation_error)
                };

                return Err(match pass {
                    Ok(()) => SagaError::ActionFailed {
                        index,
                        source: action_error,
                    },
                    Err((compensation_index, compensation_error)) => {
                        SagaError::CompensationFailed {
                            action_index: index,
                            action_error,
                            compensation_index,
                            compensation_error,
                        }
                    }
                });
            }
        }

        Ok(())
    }
}

impl<C, E> Default for Saga<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential compensation pass.
///
/// Returns the index and error of the first fatal compensation failure,
/// or `Ok(())` once the pass completes. Under the tolerant policy no
/// failure is fatal.
fn run_compensations<C, E: Debug>(
    compensations: &[Box<dyn Compensation<Context = C, Error = E>>],
    ctx: &C,
    continue_on_error: bool,
) -> Result<(), (usize, E)> {
    for (index, compensation) in compensations.iter().enumerate() {
        match compensation.compensate(ctx) {
            Ok(()) => {}
            Err(comp_error) if continue_on_error => {
                warn!(
                    compensation = index,
                    error = ?comp_error,
                    "compensation failed, continuing"
                );
            }
            Err(comp_error) => return Err((index, comp_error)),
        }
    }
    Ok(())
}

/// Fire-and-forget parallel pass: one thread per compensation.
///
/// Join handles are dropped. Failures are logged on the spawned thread
/// and never reach the caller.
fn spawn_compensations<C, E>(
    compensations: Vec<Box<dyn Compensation<Context = C, Error = E>>>,
    ctx: &C,
) where
    C: Clone + Send + 'static,
    E: Debug + 'static,
{
    for (index, compensation) in compensations.into_iter().enumerate() {
        let ctx = ctx.clone();
        thread::spawn(move || {
            if let Err(comp_error) = compensation.compensate(&ctx) {
                error!(
                    compensation = index,
                    error = ?comp_error,
                    "parallel compensation failed"
                );
            }
        });
    }
}
