use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Registry,
    TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()), $labels)
                .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! gauge {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntGauge::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 10] = [0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Callbacks ───────────────────────────────────────────────────────────────
pub static CALLBACKS_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "callbacks_total",
    "Wallet callbacks processed",
    &["endpoint", "outcome"]
);
pub static FIELD_ERRORS_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "callback_field_errors_total",
    "Fields rejected by callback validation",
    &["endpoint", "field"]
);
pub static TRANSACTIONS_CLASSIFIED: Lazy<IntCounterVec> = counter_vec!(
    "transactions_classified_total",
    "Callback transactions by detected kind",
    &["kind"]
);
pub static SERVER_ERRORS_TOTAL: Lazy<IntCounter> =
    counter!("callback_server_errors_total", "Callbacks answered with a server error");

// ── Registrations ───────────────────────────────────────────────────────────
pub static REGISTRATIONS_STORED: Lazy<IntGauge> =
    gauge!("registrations_stored", "Distinct wallet addresses with a registration");
pub static REGISTRATION_WRITES: Lazy<IntCounter> =
    counter!("registration_writes_total", "Registration upserts, including overwrites");

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(CALLBACKS_TOTAL.clone()))?;
    r.register(Box::new(FIELD_ERRORS_TOTAL.clone()))?;
    r.register(Box::new(TRANSACTIONS_CLASSIFIED.clone()))?;
    r.register(Box::new(SERVER_ERRORS_TOTAL.clone()))?;
    r.register(Box::new(REGISTRATIONS_STORED.clone()))?;
    r.register(Box::new(REGISTRATION_WRITES.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn observe_callback<'a>(endpoint: &str, rejected_fields: impl IntoIterator<Item = &'a str>) {
    let mut rejected = false;
    for field in rejected_fields {
        rejected = true;
        FIELD_ERRORS_TOTAL.with_label_values(&[endpoint, field]).inc();
    }
    let outcome = if rejected { "rejected" } else { "success" };
    CALLBACKS_TOTAL.with_label_values(&[endpoint, outcome]).inc();
}

pub fn observe_classification(kind: &str) {
    TRANSACTIONS_CLASSIFIED.with_label_values(&[kind]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> Registry {
        let r = Registry::new_custom(Some("t".into()), None).unwrap();
        register_all(&r).unwrap();
        r
    }

    #[test]
    fn test_http_request_counter() {
        let r = fresh_registry();
        observe_http("POST", "/api/data-validation", 200, 0.002);
        let out = gather_metrics(&r);
        assert!(out.contains("t_http_requests_total"));
        assert!(out.contains("t_http_request_duration_seconds"));
    }

    #[test]
    fn test_callback_outcomes() {
        let r = fresh_registry();
        observe_callback("test_endpoint", ["email", "name"]);
        observe_callback("test_endpoint", std::iter::empty());
        assert!(
            CALLBACKS_TOTAL
                .with_label_values(&["test_endpoint", "rejected"])
                .get()
                >= 1
        );
        assert!(
            FIELD_ERRORS_TOTAL
                .with_label_values(&["test_endpoint", "email"])
                .get()
                >= 1
        );
        let out = gather_metrics(&r);
        assert!(out.contains("outcome=\"success\""));
    }

    #[test]
    fn test_metric_names_prefixed() {
        let r = fresh_registry();
        observe_classification("giveaway");
        for fam in r.gather() {
            assert!(fam.get_name().starts_with("t_"), "metric {} missing prefix", fam.get_name());
        }
    }
}
