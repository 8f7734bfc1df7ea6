//! One-shot cancellation signal
//!
//! The run is stopped exactly once. Whoever stops it first (deadline, OS
//! interrupt, or the last worker exiting) records the reason; later attempts
//! are ignored. Workers poll [`StopSignal::is_stopped`] between batches, the
//! coordinator sleeps in [`StopSignal::wait_until`].

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

const RUNNING: u8 = 0;
const TIMEOUT: u8 = 1;
const INTERRUPT: u8 = 2;
const WORKERS_EXITED: u8 = 3;

/// Why the run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Configured duration elapsed
    Timeout,
    /// SIGINT or SIGTERM received
    Interrupt,
    /// Every worker left its loop before anything else stopped the run
    WorkersExited,
}

impl StopReason {
    fn code(self) -> u8 {
        match self {
            Self::Timeout => TIMEOUT,
            Self::Interrupt => INTERRUPT,
            Self::WorkersExited => WORKERS_EXITED,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            TIMEOUT => Some(Self::Timeout),
            INTERRUPT => Some(Self::Interrupt),
            WORKERS_EXITED => Some(Self::WorkersExited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Interrupt => "interrupt",
            Self::WorkersExited => "workers exited",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared stop flag with the reason it was raised
pub struct StopSignal {
    state: AtomicU8,
    lock: Mutex<()>,
    cvar: Condvar,
}

impl StopSignal {
    /// Create a signal in the running state
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
            lock: Mutex::new(()),
            cvar: Condvar::new(),
        }
    }

    /// Check if the run has been stopped
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state.load(Ordering::Acquire) != RUNNING
    }

    /// Reason the run stopped, if it has
    pub fn reason(&self) -> Option<StopReason> {
        StopReason::from_code(self.state.load(Ordering::Acquire))
    }

    /// Stop the run and wake the coordinator
    ///
    /// Returns false if the run was already stopped.
    pub fn stop(&self, reason: StopReason) -> bool {
        if !self.try_set(reason) {
            return false;
        }
        let _guard = self.lock.lock();
        self.cvar.notify_all();
        true
    }

    /// Block until the run is stopped or `deadline` passes
    ///
    /// Reaching the deadline stops the run with [`StopReason::Timeout`]
    /// unless something else got there first.
    pub fn wait_until(&self, deadline: Instant) -> StopReason {
        let mut guard = self.lock.lock();
        loop {
            if let Some(reason) = self.reason() {
                return reason;
            }
            if self.cvar.wait_until(&mut guard, deadline).timed_out() {
                self.try_set(StopReason::Timeout);
                return self.reason().unwrap_or(StopReason::Timeout);
            }
        }
    }

    /// Block until the run is stopped, with no deadline
    pub fn wait(&self) -> StopReason {
        let mut guard = self.lock.lock();
        loop {
            if let Some(reason) = self.reason() {
                return reason;
            }
            self.cvar.wait(&mut guard);
        }
    }

    fn try_set(&self, reason: StopReason) -> bool {
        self.state
            .compare_exchange(RUNNING, reason.code(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
