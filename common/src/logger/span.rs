use tracing::Span;

use super::TraceId;

/// Span for one top-level operation (a CLI command).
pub fn root_span(operation: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!("op", operation, trace_id = %trace_id)
}

/// Nested step; inherits the trace id from the enclosing root span.
pub fn child_span(step: &'static str) -> Span {
    tracing::info_span!("step", step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn events_carry_trace_id() {
        let id = TraceId::new();
        let root = root_span("swap", &id);
        let _g = root.enter();
        let _c = child_span("decode").entered();

        tracing::info!("inside");

        assert!(logs_contain(&id.to_string()));
        assert!(logs_contain("decode"));
    }
}
