//! CLI application wiring.

pub(crate) mod config_runtime;
pub(crate) mod exit_handler;
mod runtime;

pub(crate) use runtime::run_vplan;
