//! Integration tests for fire-and-forget parallel compensation.
//!
//! The parallel pass drops its join handles, so these tests observe
//! completion through a channel carried in the execution context rather
//! than through the run result.

use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use saga_core::{Action, Compensation, Saga, SagaError};

#[derive(Clone)]
struct ChannelContext {
    tx: Sender<&'static str>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

struct FailingAction;

impl Action for FailingAction {
    type Context = ChannelContext;
    type Error = TestError;

    fn act(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(TestError("action failed".to_string()))
    }
}

struct SignallingUndo {
    name: &'static str,
    fail: bool,
}

impl Compensation for SignallingUndo {
    type Context = ChannelContext;
    type Error = TestError;

    fn compensate(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.tx.send(self.name).expect("test receiver dropped");
        if self.fail {
            Err(TestError(format!("undo {} failed", self.name)))
        } else {
            Ok(())
        }
    }
}

#[test]
fn every_compensation_is_launched() {
    let (tx, rx) = mpsc::channel();
    let ctx = ChannelContext { tx };

    let result = Saga::new()
        .action(FailingAction)
        .compensation(SignallingUndo {
            name: "release",
            fail: false,
        })
        .compensation(SignallingUndo {
            name: "refund",
            fail: false,
        })
        .compensation(SignallingUndo {
            name: "notify",
            fail: false,
        })
        .parallel_compensation(true)
        .run(&ctx);

    assert!(matches!(result, Err(SagaError::ActionFailed { .. })));

    // No ordering guarantee between parallel compensations; collect and
    // sort before comparing.
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(
            rx.recv_timeout(Duration::from_secs(5))
                .expect("a parallel compensation never ran"),
        );
    }
    seen.sort_unstable();
    assert_eq!(seen, vec!["notify", "refund", "release"]);
}

#[test]
fn parallel_failures_never_surface_in_the_result() {
    let (tx, rx) = mpsc::channel();
    let ctx = ChannelContext { tx };

    // Non-tolerant policy set on purpose: it only applies to the
    // sequential pass, so the run must still report the plain action
    // failure.
    let result = Saga::new()
        .action(FailingAction)
        .compensation(SignallingUndo {
            name: "broken",
            fail: true,
        })
        .parallel_compensation(true)
        .continue_on_compensation_error(false)
        .run(&ctx);

    let err = result.expect_err("action fails");
    assert!(matches!(err, SagaError::ActionFailed { index: 0, .. }));
    assert!(err.compensation_error().is_none());

    let ran = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("compensation never ran");
    assert_eq!(ran, "broken");
}
