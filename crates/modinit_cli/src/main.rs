//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive the process-wide lifecycle registries the way a host program does:
//!   register, initialize, reload, shut down.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Environment:
//! - `MODINIT_LOG_LEVEL`: trace|debug|info|warn|error, build default otherwise.
//! - `MODINIT_LOG_DIR`: absolute directory for rolling log files; unset disables logging.

use log::info;
use modinit_core::{
    core_version, default_log_level, global_context, init_logging, run_initializers,
    run_reloaders, run_shutdown_handlers, InitializerRegister, ReloaderRegister,
    ShutdownHandlerRegister,
};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "MODINIT_LOG_LEVEL";
const LOG_DIR_ENV: &str = "MODINIT_LOG_DIR";

fn main() -> ExitCode {
    if let Err(err) = setup_logging() {
        eprintln!("modinit: {err}");
        return ExitCode::FAILURE;
    }
    println!("modinit_core version={}", core_version());

    register_demo_modules();
    print_snapshot("registered");

    run_initializers();
    run_reloaders();
    run_reloaders();
    print_snapshot("initialized");

    run_shutdown_handlers();
    print_snapshot("shutdown");
    info!("event=cli_exit module=cli status=ok");
    ExitCode::SUCCESS
}

fn setup_logging() -> Result<(), modinit_core::LoggingError> {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return Ok(());
    };
    let level =
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir)
}

fn register_demo_modules() {
    for module in ["storage", "dictionary", "session"] {
        InitializerRegister::new(module, move || println!("init {module}"));
        ShutdownHandlerRegister::new(module, move || println!("shutdown {module}"));
    }
    ReloaderRegister::new("dictionary", || println!("reload dictionary"));
}

fn print_snapshot(stage: &str) {
    match serde_json::to_string(&global_context().snapshot()) {
        Ok(json) => println!("{stage} {json}"),
        Err(err) => eprintln!("modinit: failed to encode snapshot: {err}"),
    }
}
