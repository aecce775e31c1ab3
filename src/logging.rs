//! Logging utilities for stainview.
//!
//! Rendering calls emit structured `tracing` events. Each public rendering
//! operation is wrapped in a [`RenderTimer`], which tags its start and finish
//! events with the image shape and a per-call id so the two can be matched up.

use std::time::Instant;
use tracing::{debug, error};
use uuid::Uuid;

use crate::compositor::IntensityPolicy;
use crate::error::Result;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set. Later calls leave the
/// first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Start/finish logging for one rendering call.
#[derive(Debug)]
pub struct RenderTimer {
    operation: &'static str,
    operation_id: Uuid,
    start: Instant,
}

impl RenderTimer {
    /// Log the start of `operation` on a `channels`-deep image of `width` x `height`.
    pub fn start(
        operation: &'static str,
        channels: usize,
        (width, height): (u32, u32),
        policy: Option<IntensityPolicy>,
    ) -> Self {
        let operation_id = Uuid::new_v4();
        debug!(
            operation = operation,
            operation_id = %operation_id,
            channels = channels,
            width = width,
            height = height,
            policy = ?policy,
            "Render started"
        );
        Self {
            operation,
            operation_id,
            start: Instant::now(),
        }
    }

    pub fn operation_id(&self) -> Uuid {
        self.operation_id
    }

    /// Log how the call ended and hand `result` back unchanged.
    pub fn finish<T>(self, result: Result<T>) -> Result<T> {
        let duration_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(_) => debug!(
                operation = self.operation,
                operation_id = %self.operation_id,
                duration_ms = duration_ms,
                "Render finished"
            ),
            Err(e) => error!(
                operation = self.operation,
                operation_id = %self.operation_id,
                duration_ms = duration_ms,
                error = %e,
                error_type = std::any::type_name_of_val(e),
                "Render failed"
            ),
        }
        result
    }
}
