use crate::utils::time::current_timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub pages_served: AtomicU64,
    pub total_submissions: AtomicU64,
    pub saved_registrations: AtomicU64,
    pub validation_failures: AtomicU64,
    pub csrf_rejections: AtomicU64,
    pub malformed_requests: AtomicU64,
    pub server_errors: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub pages_served: u64,
    pub total_submissions: u64,
    pub saved_registrations: u64,
    pub validation_failures: u64,
    pub csrf_rejections: u64,
    pub malformed_requests: u64,
    pub server_errors: u64,
    pub success_rate: f64,
    pub stored_registrations: i64,
    pub active_csrf_tokens: usize,
    pub uptime_seconds: i64,
    pub submissions_per_second: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            pages_served: AtomicU64::new(0),
            total_submissions: AtomicU64::new(0),
            saved_registrations: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            csrf_rejections: AtomicU64::new(0),
            malformed_requests: AtomicU64::new(0),
            server_errors: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    pub fn increment_pages(&self) {
        self.pages_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions(&self) {
        self.total_submissions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_saved(&self) {
        self.saved_registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_csrf_rejections(&self) {
        self.csrf_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_malformed(&self) {
        self.malformed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_server_errors(&self) {
        self.server_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Counter values plus derived rates. Store and token counts are passed
    /// in because reading them needs the store and the token map.
    pub fn get_snapshot(&self, stored_registrations: i64, active_csrf_tokens: usize) -> MetricsSnapshot {
        let total_submissions = self.total_submissions.load(Ordering::Relaxed);
        let saved_registrations = self.saved_registrations.load(Ordering::Relaxed);

        let success_rate = if total_submissions > 0 {
            (saved_registrations as f64 / total_submissions as f64) * 100.0
        } else {
            0.0
        };

        let uptime_seconds = current_timestamp() - self.start_time;

        let submissions_per_second = if uptime_seconds > 0 {
            total_submissions as f64 / uptime_seconds as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            pages_served: self.pages_served.load(Ordering::Relaxed),
            total_submissions,
            saved_registrations,
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            csrf_rejections: self.csrf_rejections.load(Ordering::Relaxed),
            malformed_requests: self.malformed_requests.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            success_rate,
            stored_registrations,
            active_csrf_tokens,
            uptime_seconds,
            submissions_per_second,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
