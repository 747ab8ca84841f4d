use std::marker::PhantomData;

/// A unit of forward work within a saga.
///
/// Actions are opaque to the orchestrator: it invokes them in
/// registration order and observes only success or failure. Cancellation
/// is cooperative: the execution context is handed through unchanged,
/// and implementations that may block should consult it themselves.
///
/// # Type Parameters (associated)
///
/// - `Context`: caller-supplied execution context shared by every step
/// - `Error`: the error type for step failures
pub trait Action: Send {
    /// Caller-supplied execution context, typically carrying cancellation
    /// state or shared service handles.
    type Context;

    /// Error type for action failures.
    type Error;

    /// Perform the forward effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails. The saga stops invoking
    /// further actions and runs its compensation pass.
    fn act(&self, ctx: &Self::Context) -> Result<(), Self::Error>;
}

/// A unit of reversing work, undoing the effect of a prior action.
///
/// Same contract shape as [`Action`]; invoked only after an action has
/// failed. The orchestrator does not pair compensations with specific
/// actions; every registered compensation runs on any action failure.
pub trait Compensation: Send {
    /// Caller-supplied execution context shared by every step.
    type Context;

    /// Error type for compensation failures.
    type Error;

    /// Undo a prior action's effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the compensation fails. Whether that aborts
    /// the compensation pass depends on the saga's error-tolerance
    /// policy.
    fn compensate(&self, ctx: &Self::Context) -> Result<(), Self::Error>;
}

struct ActionFn<F, C, E> {
    f: F,
    _marker: PhantomData<fn(&C) -> E>,
}

impl<F, C, E> Action for ActionFn<F, C, E>
where
    F: Fn(&C) -> Result<(), E> + Send,
{
    type Context = C;
    type Error = E;

    fn act(&self, ctx: &C) -> Result<(), E> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as an [`Action`].
#[must_use]
pub fn action_fn<F, C, E>(f: F) -> impl Action<Context = C, Error = E>
where
    F: Fn(&C) -> Result<(), E> + Send,
{
    ActionFn {
        f,
        _marker: PhantomData,
    }
}

struct CompensationFn<F, C, E> {
    f: F,
    _marker: PhantomData<fn(&C) -> E>,
}

impl<F, C, E> Compensation for CompensationFn<F, C, E>
where
    F: Fn(&C) -> Result<(), E> + Send,
{
    type Context = C;
    type Error = E;

    fn compensate(&self, ctx: &C) -> Result<(), E> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as a [`Compensation`].
#[must_use]
pub fn compensation_fn<F, C, E>(f: F) -> impl Compensation<Context = C, Error = E>
where
    F: Fn(&C) -> Result<(), E> + Send,
{
    CompensationFn {
        f,
        _marker: PhantomData,
    }
}
