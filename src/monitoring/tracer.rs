/*!
 * Tracing Setup
 * Structured logging for queue harnesses using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - FIFO_TRACE_JSON: Enable JSON output (default: false)
///
/// A second call is a no-op.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("FIFO_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if initialized {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Timed span around a multi-step queue operation
pub struct OperationSpan {
    span: Span,
    start: Instant,
}

impl OperationSpan {
    pub fn new(operation: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "operation",
            operation = operation,
            duration_ms = tracing::field::Empty,
            items_processed = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        span.in_scope(|| debug!(operation, "operation started"));

        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record the outcome and elapsed time
    pub fn finish(self, items_processed: u64, result: &str) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();
        self.span.record("duration_ms", duration_ms as u64);
        self.span.record("items_processed", items_processed);
        self.span.record("result", result);
        duration_ms
    }
}

/// Helper to create an operation span
#[inline]
pub fn span_operation(name: &str) -> OperationSpan {
    OperationSpan::new(name)
}
