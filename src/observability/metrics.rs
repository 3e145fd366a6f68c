use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::fmt;
use std::sync::Arc;

const NAMESPACE: &str = "loginrequest";

/// Counters for the login and fetch flows.
///
/// Each `Metrics` owns its registry; components receive it by `Arc` instead
/// of reaching for a process-wide instance.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub login_requests: IntCounter,
    pub login_failures: IntCounterVec,
    pub token_checks: IntCounterVec,

    // Fetch metrics
    pub fetch_requests: IntCounter,
    pub fetch_failures: IntCounterVec,
    pub decoded_pages: IntCounterVec,

    pub request_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some(NAMESPACE.into()), None)
            .expect("static namespace is a valid metric prefix");

        let metrics = Self {
            login_requests: IntCounter::new("login_requests_total", "Login exchanges issued").expect("valid metric"),
            login_failures: IntCounterVec::new(Opts::new("login_failures_total", "Login failures by reason"), &["reason"]).expect("valid metric"),
            token_checks: IntCounterVec::new(Opts::new("token_checks_total", "Token validity checks by outcome"), &["outcome"]).expect("valid metric"),

            fetch_requests: IntCounter::new("fetch_requests_total", "Authenticated fetches issued").expect("valid metric"),
            fetch_failures: IntCounterVec::new(Opts::new("fetch_failures_total", "Fetch or decode failures by reason"), &["reason"]).expect("valid metric"),
            decoded_pages: IntCounterVec::new(Opts::new("decoded_pages_total", "Decoded responses by page"), &["page"]).expect("valid metric"),

            request_duration: HistogramVec::new(HistogramOpts::new("request_duration_seconds", "HTTP round trip duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["operation"]).expect("valid metric"),

            registry,
        };

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.login_requests.clone())).expect("unique metric");
        reg.register(Box::new(metrics.login_failures.clone())).expect("unique metric");
        reg.register(Box::new(metrics.token_checks.clone())).expect("unique metric");
        reg.register(Box::new(metrics.fetch_requests.clone())).expect("unique metric");
        reg.register(Box::new(metrics.fetch_failures.clone())).expect("unique metric");
        reg.register(Box::new(metrics.decoded_pages.clone())).expect("unique metric");
        reg.register(Box::new(metrics.request_duration.clone())).expect("unique metric");

        Arc::new(metrics)
    }

    /// Prometheus text exposition of everything registered so far
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            return format!("# metrics encoding failed: {}\n", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}
