use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    killmails_received: AtomicU64,
    killmails_dropped: AtomicU64,
    killmails_posted: AtomicU64,
    killmails_failed: AtomicU64,
    marker_errors: AtomicU64,
    feed_errors: AtomicU64,
}

impl Metrics {
    pub fn record_received(&self) {
        self.killmails_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.killmails_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_posted(&self) {
        self.killmails_posted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.killmails_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_marker_error(&self) {
        self.marker_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_error(&self) {
        self.feed_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn posted(&self) -> u64 {
        self.killmails_posted.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let received = self.killmails_received.load(Ordering::Relaxed);
        let dropped = self.killmails_dropped.load(Ordering::Relaxed);
        let posted = self.killmails_posted.load(Ordering::Relaxed);
        let failed = self.killmails_failed.load(Ordering::Relaxed);
        let marker_errors = self.marker_errors.load(Ordering::Relaxed);
        let feed_errors = self.feed_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE killfeed_killmails_received_total counter\n\
killfeed_killmails_received_total {}\n\
# TYPE killfeed_killmails_dropped_total counter\n\
killfeed_killmails_dropped_total {}\n\
# TYPE killfeed_killmails_posted_total counter\n\
killfeed_killmails_posted_total {}\n\
# TYPE killfeed_killmails_failed_total counter\n\
killfeed_killmails_failed_total {}\n\
# TYPE killfeed_marker_errors_total counter\n\
killfeed_marker_errors_total {}\n\
# TYPE killfeed_feed_errors_total counter\n\
killfeed_feed_errors_total {}\n",
            received, dropped, posted, failed, marker_errors, feed_errors
        )
    }
}
