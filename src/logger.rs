//! Minimal logging capability handed to the application layer.

/// Something that can report progress and failures.
pub trait Logger {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }
}
