//! Process-wide lifecycle context, drivers and registration handles.
//!
//! Modules that cannot be handed a [`LifecycleContext`] register through the
//! handle types here; the program entry point then calls the three drivers at
//! the matching lifecycle points.

use crate::context::LifecycleContext;
use once_cell::sync::Lazy;

static GLOBAL_CONTEXT: Lazy<LifecycleContext> = Lazy::new(LifecycleContext::new);

/// Returns the process-wide context, creating it on first access.
pub fn global_context() -> &'static LifecycleContext {
    &GLOBAL_CONTEXT
}

/// Runs pending process-wide initializers once, in registration order.
///
/// Call early in process life, before other module entry points are used.
pub fn run_initializers() {
    global_context().run_initializers();
}

/// Runs every process-wide reloader, in registration order.
pub fn run_reloaders() {
    global_context().run_reloaders();
}

/// Runs pending process-wide shutdown handlers once, in reverse order.
///
/// Call as the process begins terminating.
pub fn run_shutdown_handlers() {
    global_context().run_shutdown_handlers();
}

/// Registers a process-wide initializer on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializerRegister {
    label: &'static str,
}

impl InitializerRegister {
    pub fn new<F>(label: &'static str, hook: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        global_context().register_initializer(label, hook);
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Registers a process-wide reloader on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloaderRegister {
    label: &'static str,
}

impl ReloaderRegister {
    pub fn new<F>(label: &'static str, hook: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        global_context().register_reloader(label, hook);
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Registers a process-wide shutdown handler on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownHandlerRegister {
    label: &'static str,
}

impl ShutdownHandlerRegister {
    pub fn new<F>(label: &'static str, hook: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        global_context().register_shutdown_handler(label, hook);
        Self { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
