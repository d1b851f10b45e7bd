//! Process-context object owning the three lifecycle registries.
//!
//! # Responsibility
//! - Give startup/teardown code one explicit value to register and run hooks.
//! - Bind init, reload and shutdown to their fixed run policies.
//!
//! # Invariants
//! - The three registries are independent; no ordering holds between them.

use crate::hook::HookKind;
use crate::registry::{HookFailure, HookRegistry};
use serde::Serialize;

/// Pending hook labels per lifecycle event, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleSnapshot {
    pub initializers: Vec<String>,
    pub reloaders: Vec<String>,
    pub shutdown_handlers: Vec<String>,
}

/// Lifecycle registries for one process.
#[derive(Debug)]
pub struct LifecycleContext {
    init: HookRegistry,
    reload: HookRegistry,
    shutdown: HookRegistry,
}

impl Default for LifecycleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleContext {
    pub fn new() -> Self {
        Self {
            init: HookRegistry::new(HookKind::Init),
            reload: HookRegistry::new(HookKind::Reload),
            shutdown: HookRegistry::new(HookKind::Shutdown),
        }
    }

    pub fn registry(&self, kind: HookKind) -> &HookRegistry {
        match kind {
            HookKind::Init => &self.init,
            HookKind::Reload => &self.reload,
            HookKind::Shutdown => &self.shutdown,
        }
    }

    /// Registers one hook for `kind`.
    pub fn register<F>(&self, kind: HookKind, label: impl Into<String>, hook: F)
    where
        F: Fn() + Send + 'static,
    {
        self.registry(kind).add(label, hook);
    }

    pub fn register_initializer<F>(&self, label: impl Into<String>, hook: F)
    where
        F: Fn() + Send + 'static,
    {
        self.init.add(label, hook);
    }

    pub fn register_reloader<F>(&self, label: impl Into<String>, hook: F)
    where
        F: Fn() + Send + 'static,
    {
        self.reload.add(label, hook);
    }

    pub fn register_shutdown_handler<F>(&self, label: impl Into<String>, hook: F)
    where
        F: Fn() + Send + 'static,
    {
        self.shutdown.add(label, hook);
    }

    /// Runs pending initializers in registration order, then discards them.
    pub fn run_initializers(&self) {
        self.init.run();
    }

    /// Runs every reloader in registration order; the list is kept.
    pub fn run_reloaders(&self) {
        self.reload.run();
    }

    /// Runs pending shutdown handlers in reverse registration order, then
    /// discards them.
    pub fn run_shutdown_handlers(&self) {
        self.shutdown.run();
    }

    /// Runs one registry, returning the first hook failure instead of
    /// unwinding.
    ///
    /// # Errors
    /// - Returns [`HookFailure`] for the first hook that panics.
    pub fn try_run(&self, kind: HookKind) -> Result<usize, HookFailure> {
        self.registry(kind).try_run()
    }

    pub fn snapshot(&self) -> LifecycleSnapshot {
        LifecycleSnapshot {
            initializers: self.init.labels(),
            reloaders: self.reload.labels(),
            shutdown_handlers: self.shutdown.labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LifecycleContext, LifecycleSnapshot};
    use crate::hook::HookKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn registries_are_independent() {
        let context = LifecycleContext::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        context.register_initializer("core.init", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        context.register_reloader("core.reload", || {});

        context.run_shutdown_handlers();
        context.run_reloaders();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(context.registry(HookKind::Init).len(), 1);

        context.run_initializers();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(context.registry(HookKind::Init).is_empty());
        assert_eq!(context.registry(HookKind::Reload).len(), 1);
    }

    #[test]
    fn register_by_kind_routes_to_matching_registry() {
        let context = LifecycleContext::new();
        for kind in HookKind::ALL {
            context.register(kind, format!("{kind}.hook"), || {});
            assert_eq!(context.registry(kind).kind(), kind);
        }

        assert_eq!(
            context.snapshot(),
            LifecycleSnapshot {
                initializers: vec!["init.hook".to_string()],
                reloaders: vec!["reload.hook".to_string()],
                shutdown_handlers: vec!["shutdown.hook".to_string()],
            }
        );
    }

    #[test]
    fn snapshot_serializes_with_stable_field_names() {
        let context = LifecycleContext::new();
        context.register_shutdown_handler("db.close", || {});
        context.register_shutdown_handler("cache.flush", || {});

        let json = serde_json::to_value(context.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "initializers": [],
                "reloaders": [],
                "shutdown_handlers": ["db.close", "cache.flush"],
            })
        );
    }

    #[test]
    fn try_run_reports_failing_hook_label() {
        let context = LifecycleContext::new();
        context.register_reloader("config.reload", || panic!("config file missing"));

        let failure = context
            .try_run(HookKind::Reload)
            .expect_err("panicking reloader should surface as failure");
        assert_eq!(failure.label, "config.reload");
        assert_eq!(
            failure.to_string(),
            "reload hook `config.reload` failed: config file missing"
        );
    }
}
