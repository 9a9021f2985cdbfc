use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use bytes::Bytes;
use chrono::Utc;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use serde::de::IgnoredAny;

use crate::cookies::{CookieLookup, CookieReader};
use crate::metrics::{self, counters};
use crate::obs::{AccessLog, ObsSink};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";
const METRICS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

static REQ_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

fn gen_request_id() -> String {
    let n = REQ_COUNTER.fetch_add(1, Ordering::Relaxed);
    let ts = Utc::now().timestamp_millis();
    format!("req-{}-{:x}", ts, n)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /cookie`
    DefaultCookie,
    /// `GET /cookies/{name}`, name percent-decoded.
    NamedCookie(Cow<'a, str>),
    /// `GET /metrics`
    Metrics,
    NotFound,
}

impl Route<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Route::DefaultCookie => "default_cookie",
            Route::NamedCookie(_) => "named_cookie",
            Route::Metrics => "metrics",
            Route::NotFound => "not_found",
        }
    }
}

/// Map a request line onto a route. Repeated slashes are ignored; a cookie
/// name that does not percent-decode to utf-8 routes nowhere.
pub fn route<'a>(method: &Method, path: &'a str) -> Route<'a> {
    if method != Method::GET {
        return Route::NotFound;
    }

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next(), segments.next()) {
        (Some("cookie"), None, _) => Route::DefaultCookie,
        (Some("cookies"), Some(name), None) => match percent_decode_str(name).decode_utf8() {
            Ok(name) => Route::NamedCookie(name),
            Err(_) => Route::NotFound,
        },
        (Some("metrics"), None, _) => Route::Metrics,
        _ => Route::NotFound,
    }
}

/// Route handlers that hand cookie payloads back to the client.
#[derive(Clone)]
pub struct CookieRoutes {
    reader: CookieReader,
    obs: Option<ObsSink>,
}

impl CookieRoutes {
    pub fn new(reader: CookieReader) -> Self {
        Self { reader, obs: None }
    }

    pub fn with_obs(mut self, obs: ObsSink) -> Self {
        self.obs = Some(obs);
        self
    }

    pub fn reader(&self) -> &CookieReader {
        &self.reader
    }

    pub fn handle<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        let started = Instant::now();
        let route = route(req.method(), req.uri().path());
        counters::on_req_start(route.label());

        let (cookie_name, lookup) = match &route {
            Route::DefaultCookie => {
                let name = self.reader.default_cookie_name();
                (Some(name), Some(self.reader.lookup(name, req)))
            }
            Route::NamedCookie(name) => (Some(&**name), Some(self.reader.lookup(name, req))),
            Route::Metrics | Route::NotFound => (None, None),
        };
        let outcome = lookup.as_ref().map(CookieLookup::outcome_str);

        let resp = match (&route, lookup) {
            (Route::Metrics, _) => respond(StatusCode::OK, METRICS_TEXT, metrics::gather_as_text()),
            (_, Some(lookup)) => cookie_response(lookup.into_value()),
            _ => respond(StatusCode::NOT_FOUND, TEXT_PLAIN, "not found"),
        };

        let status = resp.status().as_u16();
        let elapsed = started.elapsed();
        counters::on_req_end(route.label(), status, elapsed.as_secs_f64());
        tracing::debug!(route = route.label(), status, outcome = outcome.unwrap_or("-"), "handled");

        if let Some(obs) = &self.obs {
            obs.write_access(&AccessLog {
                ts: Utc::now(),
                request_id: gen_request_id(),
                method: req.method().to_string(),
                path: req.uri().path().to_string(),
                route: route.label(),
                cookie_name: cookie_name.map(str::to_string),
                outcome,
                status,
                latency_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            });
        }

        resp
    }
}

// The decoded value is sent back untouched; JSON only picks the content type.
fn cookie_response(value: Option<String>) -> Response<Full<Bytes>> {
    let Some(value) = value else {
        return respond(StatusCode::NOT_FOUND, TEXT_PLAIN, "cookie not found");
    };

    let content_type = match serde_json::from_str::<IgnoredAny>(&value) {
        Ok(_) => APPLICATION_JSON,
        Err(_) => TEXT_PLAIN,
    };
    respond(StatusCode::OK, content_type, value)
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(body.into()));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}
