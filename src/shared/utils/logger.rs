use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger(verbose: bool) {
    INIT.call_once(|| {
        let crate_level = if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn) // Default level
            .filter_module("anime_scroll_lib", crate_level) // More verbose for our crate
            .filter_module("anime_scroll", crate_level)
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log API calls
    pub fn api_call(provider: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!(
                "API: {} {} {} in {}ms",
                provider, endpoint, status, duration
            ),
            None => debug!("API: Starting {} {}", provider, endpoint),
        }
    }

    /// Log a sentinel visibility report
    pub fn intersection(ratio: f64, threshold: f64, crossed: bool) {
        info!(
            "Sentinel: intersection ratio {:.2} (threshold {:.2}) -> {}",
            ratio,
            threshold,
            if crossed { "visible" } else { "ignored" }
        );
    }

    /// Log a batch landing in the accumulated list
    pub fn batch_appended(page: i64, batch_len: usize, total: usize) {
        info!(
            "Feed: page {} appended {} items ({} total)",
            page, batch_len, total
        );
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
