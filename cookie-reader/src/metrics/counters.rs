use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

pub static REQ_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookie_reader_http_requests_total",
        "Total HTTP requests seen by the cookie service",
        &["route"]
    )
        .expect("register cookie_reader_http_requests_total")
});

pub static RESP_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookie_reader_http_responses_total",
        "Total HTTP responses returned by the cookie service",
        &["route", "code"]
    )
        .expect("register cookie_reader_http_responses_total")
});

pub static REQ_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];
    register_histogram_vec!(
        "cookie_reader_http_request_duration_seconds",
        "Handler duration in seconds",
        &["route"],
        buckets
    )
        .expect("register cookie_reader_http_request_duration_seconds")
});

pub static COOKIE_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookie_reader_lookups_total",
        "Cookie lookups by outcome",
        &["outcome"]
    )
        .expect("register cookie_reader_lookups_total")
});

#[inline]
pub fn on_req_start(route: &str) {
    REQ_TOTAL.with_label_values(&[route]).inc();
}

#[inline]
pub fn on_req_end(route: &str, status: u16, secs: f64) {
    RESP_TOTAL
        .with_label_values(&[route, &status.to_string()])
        .inc();
    REQ_DURATION.with_label_values(&[route]).observe(secs);
}

#[inline]
pub fn inc_cookie_lookup(outcome: &str) {
    COOKIE_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
}
