//! StateGraph integration tests: compile-time validation, invoke and cancellation.

#[path = "../init_logging.rs"]
mod init_logging;

mod cancel;
mod common;
mod compile_fail;
mod invoke;
