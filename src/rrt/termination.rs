//! Conditions that tell a planner when to stop.
//!
//! Planners poll `evaluate` once at the top of every iteration. Cancellation is cooperative:
//! an iteration in progress always runs to completion before the next poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait TerminationCondition {
    /// Returns true when planning should stop.
    fn evaluate(&mut self) -> bool;
}

/// Stops after a fixed number of iterations.
pub struct MaxIterationsTermination {
    max_iterations: usize,
    iterations: usize,
}

impl MaxIterationsTermination {
    /// Parameters:
    /// - `max_iterations`: How many times `evaluate` returns false before it starts returning true.
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            iterations: 0,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Allows another `max_iterations` iterations.
    pub fn reset(&mut self) {
        self.iterations = 0;
    }
}

impl TerminationCondition for MaxIterationsTermination {
    fn evaluate(&mut self) -> bool {
        if self.iterations >= self.max_iterations {
            return true;
        }
        self.iterations += 1;
        false
    }
}

/// Stops once a deadline has passed.
pub struct TimedTermination {
    deadline: Instant,
}

impl TimedTermination {
    /// Deadline `budget` from now.
    pub fn new(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
        }
    }

    pub fn until(deadline: Instant) -> Self {
        Self { deadline }
    }
}

impl TerminationCondition for TimedTermination {
    fn evaluate(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Shared flag used to cancel a running planner from elsewhere, e.g. another thread.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// A termination condition that fires once this token is cancelled.
    pub fn termination(&self) -> CancellationTermination {
        CancellationTermination {
            token: self.clone(),
        }
    }
}

pub struct CancellationTermination {
    token: CancellationToken,
}

impl TerminationCondition for CancellationTermination {
    fn evaluate(&mut self) -> bool {
        self.token.is_cancelled()
    }
}

/// Wraps a closure.
pub struct FnTermination<T: FnMut() -> bool> {
    condition: T,
}

impl<T: FnMut() -> bool> FnTermination<T> {
    pub fn new(condition: T) -> Self {
        Self { condition }
    }
}

impl<T: FnMut() -> bool> TerminationCondition for FnTermination<T> {
    fn evaluate(&mut self) -> bool {
        (self.condition)()
    }
}

/// Stops as soon as any of its conditions does.
///
/// Every condition is evaluated on each poll so that counting conditions stay in step.
#[derive(Default)]
pub struct AnyTermination {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl AnyTermination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, condition: impl TerminationCondition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }
}

impl TerminationCondition for AnyTermination {
    fn evaluate(&mut self) -> bool {
        self.conditions
            .iter_mut()
            .fold(false, |stop, condition| condition.evaluate() || stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_max_iterations() {
        let mut termination = MaxIterationsTermination::new(3);
        assert!(!termination.evaluate());
        assert!(!termination.evaluate());
        assert!(!termination.evaluate());
        assert!(termination.evaluate());
        assert!(termination.evaluate());
        assert_eq!(termination.iterations(), 3);
        termination.reset();
        assert!(!termination.evaluate());
    }

    #[test]
    fn test_zero_iterations_stops_immediately() {
        assert!(MaxIterationsTermination::new(0).evaluate());
    }

    #[test]
    fn test_timed() {
        assert!(TimedTermination::new(Duration::ZERO).evaluate());
        assert!(!TimedTermination::new(Duration::from_secs(3600)).evaluate());
    }

    #[test]
    fn test_cancellation_across_threads() {
        let token = CancellationToken::new();
        let mut termination = token.termination();
        assert!(!termination.evaluate());
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(termination.evaluate());
    }

    #[test]
    fn test_any_polls_every_condition() {
        let polls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&polls);
        let mut any = AnyTermination::new()
            .or(MaxIterationsTermination::new(2))
            .or(FnTermination::new(move || {
                counted.set(counted.get() + 1);
                false
            }));
        assert!(!any.evaluate());
        assert!(!any.evaluate());
        assert!(any.evaluate());
        assert_eq!(polls.get(), 3);
    }
}
