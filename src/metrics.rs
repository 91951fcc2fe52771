use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("portfolio_requests_total", "Total number of API requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter =
        register_counter!("portfolio_rate_limited_total", "Requests refused or downgraded by a rate limiter").unwrap();
    pub static ref FALLBACK_TOTAL: Counter =
        register_counter!("portfolio_completion_fallbacks_total", "Completions answered with a canned fallback").unwrap();
    pub static ref CONTACT_TOTAL: Counter =
        register_counter!("portfolio_contact_submissions_total", "Accepted contact form submissions").unwrap();
    pub static ref COMPLETION_LATENCY: Histogram = register_histogram!(
        "portfolio_completion_latency_seconds",
        "Completion service latency in seconds"
    )
    .unwrap();
}
