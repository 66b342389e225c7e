use crate::utils::{Labels, Method, Metrics, Resource, Status};
use tokio::{sync::Mutex, time::Instant};
use tracing::{Span, error, info, info_span};

/// Span and clock for one service operation.
pub struct TracingContext {
    pub span: Span,
    pub resource: Resource,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(resource: Resource, operation_name: &str) -> Self {
        let span = info_span!(
            "operation",
            resource = resource.as_str(),
            operation = operation_name
        );
        span.in_scope(|| info!("Starting operation: {operation_name}"));

        Self {
            span,
            resource,
            start_time: Instant::now(),
        }
    }

    pub async fn complete(
        &self,
        metrics: &Mutex<Metrics>,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = self.start_time.elapsed().as_secs_f64();

        self.span.in_scope(|| {
            if is_success {
                info!(duration_secs = elapsed, "✅ Operation completed successfully: {message}");
            } else {
                error!(duration_secs = elapsed, "❌ Operation failed: {message}");
            }
        });

        let labels = Labels {
            resource: self.resource,
            method,
            status,
        };
        metrics.lock().await.record(labels, elapsed);
    }
}
