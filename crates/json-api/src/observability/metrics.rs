//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct ShopMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    checkouts_total: IntCounterVec,
    flow_rejections_total: IntCounterVec,
}

static SHOP_METRICS: OnceLock<Option<ShopMetrics>> = OnceLock::new();

/// How a checkout request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CheckoutOutcome {
    Placed,
    Rejected,
    Failed,
}

impl CheckoutOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn record_checkout(outcome: CheckoutOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .checkouts_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }
}

/// Count a shopper being sent back to `redirect`.
pub(crate) fn record_rejection(redirect: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .flow_rejections_total
            .with_label_values(&[redirect])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static ShopMetrics> {
    SHOP_METRICS.get_or_init(build_metrics).as_ref()
}

fn registered<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register {name} metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<ShopMetrics> {
    let registry = Registry::new();

    let requests_total = registered(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "birthday_box_http_requests_total",
                "HTTP requests by method, route and status code.",
            ),
            &["method", "route", "status_code"],
        ),
    )?;

    let request_duration_seconds = registered(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "birthday_box_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = registered(
        &registry,
        "requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "birthday_box_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
    )?;

    let checkouts_total = registered(
        &registry,
        "checkouts_total",
        IntCounterVec::new(
            Opts::new(
                "birthday_box_checkouts_total",
                "Checkout attempts by outcome.",
            ),
            &["outcome"],
        ),
    )?;

    let flow_rejections_total = registered(
        &registry,
        "flow_rejections_total",
        IntCounterVec::new(
            Opts::new(
                "birthday_box_flow_rejections_total",
                "Requests refused and redirected, by the step redirected to.",
            ),
            &["redirect"],
        ),
    )?;

    Some(ShopMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        checkouts_total,
        flow_rejections_total,
    })
}
