//! Deferred-action scheduler keyed on absolute simulation time.
//!
//! Jobs fire in non-decreasing time order; jobs due at the same time fire in
//! the order they were added. A job added while the queue is draining is
//! eligible in the same `update` if it is already due, so actions can chain
//! without waiting a frame.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Outcome of firing an action or a whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The run should end. Propagated to the driver.
    Stop,
}

#[derive(Debug)]
struct Job<A> {
    at: f64,
    seq: u64,
    action: A,
}

impl<A> Ord for Job<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .total_cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<A> PartialOrd for Job<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> PartialEq for Job<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A> Eq for Job<A> {}

/// Min-queue of `(fire time, action)` pairs with its own clock.
#[derive(Debug)]
pub struct Cron<A> {
    now: f64,
    heap: BinaryHeap<Reverse<Job<A>>>,
    next_seq: u64,
}

impl<A> Cron<A> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Current scheduler time (seconds).
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `action` to fire `delay` seconds from now. Negative delays
    /// are allowed and make the job immediately due.
    pub fn add(&mut self, delay: f64, action: A) {
        self.add_at(self.now + delay, action);
    }

    /// Schedule `action` at absolute time `at`.
    pub fn add_at(&mut self, at: f64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Job { at, seq, action }));
    }

    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    /// Remove and return the earliest job if it is due.
    pub fn pop_due(&mut self) -> Option<(f64, A)> {
        let due = self.heap.peek().is_some_and(|Reverse(job)| job.at <= self.now);
        if !due {
            return None;
        }
        self.heap.pop().map(|Reverse(job)| (job.at, job.action))
    }

    /// Advance the clock by `dt`, then fire every due job through `fire`.
    ///
    /// `fire` may add new jobs; those already due fire before this returns.
    /// A `Flow::Stop` ends the drain at once and is returned; remaining jobs
    /// stay queued. Errors from `fire` propagate the same way.
    pub fn update<E, F>(&mut self, dt: f64, mut fire: F) -> Result<Flow, E>
    where
        F: FnMut(&mut Cron<A>, A) -> Result<Flow, E>,
    {
        self.advance(dt);
        while let Some((_, action)) = self.pop_due() {
            if fire(self, action)? == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Drop every pending job without firing it. The clock keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Drop every pending job and rewind the clock to zero.
    pub fn reset(&mut self) {
        self.heap.clear();
        self.now = 0.0;
        self.next_seq = 0;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Fire time of the earliest pending job.
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(job)| job.at)
    }
}

impl<A> Default for Cron<A> {
    fn default() -> Self {
        Self::new()
    }
}
