//! Lifecycle hook values and per-kind run policy.
//!
//! # Responsibility
//! - Define the opaque callback type modules register.
//! - Bind each lifecycle event to its fixed traversal order and post-run action.
//!
//! # Invariants
//! - Labels are diagnostic only; they never affect ordering or execution.
//! - Policy is a pure function of `HookKind`.

use std::fmt::{Debug, Display, Formatter};

/// No-argument, no-return callback registered by one module.
pub type Hook = Box<dyn Fn() + Send + 'static>;

/// Lifecycle event a hook is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookKind {
    Init,
    Reload,
    Shutdown,
}

/// Traversal order applied by one registry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOrder {
    /// Registration order.
    Forward,
    /// Reverse registration order.
    Reverse,
}

/// What a registry does with its list after a full traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRun {
    /// Discard every hook; each registration fires at most once.
    Clear,
    /// Keep the list for the next run.
    Keep,
}

impl HookKind {
    pub const ALL: [HookKind; 3] = [Self::Init, Self::Reload, Self::Shutdown];

    /// Stable string id used in log events and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Reload => "reload",
            Self::Shutdown => "shutdown",
        }
    }

    pub fn order(self) -> RunOrder {
        match self {
            Self::Init | Self::Reload => RunOrder::Forward,
            // Later registrations may depend on earlier ones, so they go first.
            Self::Shutdown => RunOrder::Reverse,
        }
    }

    pub fn post_run(self) -> PostRun {
        match self {
            Self::Init | Self::Shutdown => PostRun::Clear,
            Self::Reload => PostRun::Keep,
        }
    }
}

impl Display for HookKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry slot: a labelled hook.
pub struct HookEntry {
    label: String,
    hook: Hook,
}

impl HookEntry {
    pub fn new<F>(label: impl Into<String>, hook: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        Self {
            label: label.into(),
            hook: Box::new(hook),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invokes the wrapped hook once.
    pub fn invoke(&self) {
        (self.hook)()
    }
}

impl Debug for HookEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookEntry")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{HookEntry, HookKind, PostRun, RunOrder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn policies_match_lifecycle_event() {
        assert_eq!(HookKind::Init.order(), RunOrder::Forward);
        assert_eq!(HookKind::Init.post_run(), PostRun::Clear);
        assert_eq!(HookKind::Reload.order(), RunOrder::Forward);
        assert_eq!(HookKind::Reload.post_run(), PostRun::Keep);
        assert_eq!(HookKind::Shutdown.order(), RunOrder::Reverse);
        assert_eq!(HookKind::Shutdown.post_run(), PostRun::Clear);
    }

    #[test]
    fn kind_ids_are_stable() {
        let ids: Vec<_> = HookKind::ALL.iter().map(|kind| kind.to_string()).collect();
        assert_eq!(ids, vec!["init", "reload", "shutdown"]);
    }

    #[test]
    fn entry_invokes_hook_and_debug_shows_label_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let entry = HookEntry::new("net.init", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        entry.invoke();
        entry.invoke();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(entry.label(), "net.init");
        assert!(format!("{entry:?}").contains("net.init"));
    }
}
