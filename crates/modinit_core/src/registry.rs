//! Ordered, lock-guarded hook registry.
//!
//! # Responsibility
//! - Accumulate hooks for one lifecycle event in registration order.
//! - Run them under the policy bound to that event.
//!
//! # Invariants
//! - `add` and `run` are mutually exclusive; the lock is held for the whole
//!   traversal, so a concurrent `add` lands fully before or fully after a run.
//! - At most one run executes at a time per registry.
//! - An aborted discard-policy run retires only the hooks that completed;
//!   the failed hook and the ones not yet reached stay in order.
//!
//! # Reentrancy
//! The lock is not reentrant. A hook must not call `add` or `run` on the
//! registry that is running it; doing so deadlocks.

use crate::hook::{HookEntry, HookKind, PostRun, RunOrder};
use crate::logging::panic_message;
use log::{debug, error, trace};
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hook failure captured by [`HookRegistry::try_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub kind: HookKind,
    pub label: String,
    pub message: String,
}

impl Display for HookFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hook `{}` failed: {}",
            self.kind, self.label, self.message
        )
    }
}

impl Error for HookFailure {}

/// One lifecycle registry.
#[derive(Debug)]
pub struct HookRegistry {
    kind: HookKind,
    entries: Mutex<Vec<HookEntry>>,
}

impl HookRegistry {
    pub fn new(kind: HookKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Appends one hook to the end of the list.
    pub fn add<F>(&self, label: impl Into<String>, hook: F)
    where
        F: Fn() + Send + 'static,
    {
        let entry = HookEntry::new(label, hook);
        trace!(
            "event=hook_added module=registry kind={} label={}",
            self.kind,
            entry.label()
        );
        self.lock().push(entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns pending hook labels in registration order.
    pub fn labels(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|entry| entry.label().to_string())
            .collect()
    }

    /// Invokes every pending hook under this registry's policy.
    ///
    /// Returns the number of hooks invoked. A panicking hook unwinds out of
    /// this call and aborts the remaining traversal.
    pub fn run(&self) -> usize {
        let outcome = self.traverse(|entry| -> Result<(), Infallible> {
            entry.invoke();
            Ok(())
        });
        match outcome {
            Ok(count) => count,
            Err(never) => match never {},
        }
    }

    /// Same as [`HookRegistry::run`], but a panicking hook is returned as
    /// [`HookFailure`] instead of unwinding.
    ///
    /// # Errors
    /// - Returns the first hook failure; later hooks are not invoked.
    pub fn try_run(&self) -> Result<usize, HookFailure> {
        self.traverse(|entry| {
            catch_unwind(AssertUnwindSafe(|| entry.invoke())).map_err(|payload| {
                let failure = HookFailure {
                    kind: self.kind,
                    label: entry.label().to_string(),
                    message: panic_message(payload.as_ref()),
                };
                error!(
                    "event=hook_failed module=registry status=error kind={} label={} payload={}",
                    failure.kind, failure.label, failure.message
                );
                failure
            })
        })
    }

    fn traverse<E>(
        &self,
        mut invoke: impl FnMut(&HookEntry) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut entries = self.lock();
        let total = entries.len();
        debug!(
            "event=hooks_run module=registry status=start kind={} count={}",
            self.kind, total
        );

        let order = self.kind.order();
        let mut pass = Pass {
            entries: &mut *entries,
            order,
            post_run: self.kind.post_run(),
            completed: 0,
        };
        for step in 0..total {
            let index = match order {
                RunOrder::Forward => step,
                RunOrder::Reverse => total - 1 - step,
            };
            let entry = &pass.entries[index];
            trace!(
                "event=hook_invoke module=registry kind={} label={}",
                self.kind,
                entry.label()
            );
            invoke(entry)?;
            pass.completed += 1;
        }
        drop(pass);

        debug!(
            "event=hooks_run module=registry status=ok kind={} count={}",
            self.kind, total
        );
        Ok(total)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HookEntry>> {
        // A hook that unwound out of `run` poisons the lock; `Pass` has already
        // left the list consistent by then.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Retires completed hooks when a traversal ends, including by unwinding.
struct Pass<'a> {
    entries: &'a mut Vec<HookEntry>,
    order: RunOrder,
    post_run: PostRun,
    completed: usize,
}

impl Drop for Pass<'_> {
    fn drop(&mut self) {
        if self.post_run == PostRun::Keep || self.completed == 0 {
            return;
        }
        if self.completed == self.entries.len() {
            self.entries.clear();
            self.entries.shrink_to_fit();
            return;
        }
        match self.order {
            RunOrder::Forward => {
                self.entries.drain(..self.completed);
            }
            RunOrder::Reverse => {
                let keep = self.entries.len() - self.completed;
                self.entries.truncate(keep);
            }
        }
    }
}
