pub use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Whether to log (verbose) error output.
/// Set once at startup from the `DEBUG` config flag.
static ERROR_LOGGER: AtomicBool = AtomicBool::new(false);

pub fn debug_error_enabled(enabled: bool) {
    ERROR_LOGGER.store(enabled, Ordering::Relaxed);
}

/// Operator-facing diagnostics channel. Panel fallbacks never include
/// this detail; it only reaches stderr, and only when enabled.
pub fn debug_error(err: anyhow::Error) {
    if ERROR_LOGGER.load(Ordering::Relaxed) {
        eprintln!("Warn: {}", err);
        for err in err.chain().skip(1) {
            eprintln!("Caused by: {}", err);
        }
    }
}

pub static DEBUG: DebugMetrics = DebugMetrics::new();

pub struct DebugMetrics {
    panel_count: AtomicUsize,
    rendered: AtomicUsize,
    empty: AtomicUsize,
    failed: AtomicUsize,
    fetch_errors: AtomicUsize,
    decode_errors: AtomicUsize,
}

impl DebugMetrics {
    pub const fn new() -> Self {
        DebugMetrics {
            panel_count: AtomicUsize::new(0),
            rendered: AtomicUsize::new(0),
            empty: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            fetch_errors: AtomicUsize::new(0),
            decode_errors: AtomicUsize::new(0),
        }
    }

    pub fn panel_rendered(&self) {
        self.panel_count.fetch_add(1, Ordering::Relaxed);
        self.rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn panel_empty(&self) {
        self.panel_count.fetch_add(1, Ordering::Relaxed);
        self.empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn panel_failed(&self) {
        self.panel_count.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decode_failed(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    // Log the current metrics and reset the counters
    pub fn publish(&self) {
        let panel_count = self.panel_count.swap(0, Ordering::Relaxed);
        let rendered = self.rendered.swap(0, Ordering::Relaxed);
        let empty = self.empty.swap(0, Ordering::Relaxed);
        let failed = self.failed.swap(0, Ordering::Relaxed);
        let fetch_errors = self.fetch_errors.swap(0, Ordering::Relaxed);
        let decode_errors = self.decode_errors.swap(0, Ordering::Relaxed);
        println!(
            "Debug: panels {} | rendered {} | empty {} | failed {} (fetch errors {}, decode errors {})",
            panel_count, rendered, empty, failed, fetch_errors, decode_errors
        );
    }
}
