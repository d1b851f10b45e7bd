//! Module lifecycle registry.
//! Modules register init, reload and shutdown hooks without knowing about each
//! other; one driver per event later runs them in a defined order.

pub mod context;
pub mod global;
pub mod hook;
pub mod logging;
pub mod registry;

pub use context::{LifecycleContext, LifecycleSnapshot};
pub use global::{
    global_context, run_initializers, run_reloaders, run_shutdown_handlers, InitializerRegister,
    ReloaderRegister, ShutdownHandlerRegister,
};
pub use hook::{Hook, HookEntry, HookKind, PostRun, RunOrder};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use registry::{HookFailure, HookRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
