use crate::config::CookieConfig;
use crate::encoding::{decode_base64, DecodeError};
use crate::metrics::counters;

use super::header::HeaderView;
use super::parse::get_cookie_value;

pub const COOKIE_HEADER: &str = "cookie";

/// Result of looking a cookie up, before it is collapsed to an `Option`.
#[derive(Debug)]
pub enum CookieLookup {
    Found(String),
    Missing,
    /// Present, but the value did not decode. Callers treat it as absent.
    Invalid(DecodeError),
}

impl CookieLookup {
    pub fn into_value(self) -> Option<String> {
        match self {
            CookieLookup::Found(v) => Some(v),
            CookieLookup::Missing | CookieLookup::Invalid(_) => None,
        }
    }

    pub fn outcome_str(&self) -> &'static str {
        match self {
            CookieLookup::Found(_) => "found",
            CookieLookup::Missing => "missing",
            CookieLookup::Invalid(_) => "invalid",
        }
    }
}

/// Reads base64-encoded cookies off a request.
///
/// Built once from config and cloned into whatever serves requests; it holds
/// no per-request state.
#[derive(Debug, Clone)]
pub struct CookieReader {
    default_name: String,
}

impl CookieReader {
    pub fn new(cfg: &CookieConfig) -> Self {
        Self {
            default_name: cfg.cookie_name.clone(),
        }
    }

    pub fn default_cookie_name(&self) -> &str {
        &self.default_name
    }

    /// Decoded value of cookie `name`, or `None` if the request has no such
    /// cookie or its value is not valid base64 / utf-8.
    ///
    /// With several `Cookie` headers, or a name repeated inside one, the first
    /// occurrence wins.
    pub fn get_cookie(&self, name: &str, req: &dyn HeaderView) -> Option<String> {
        self.lookup(name, req).into_value()
    }

    pub fn get_default_cookie(&self, req: &dyn HeaderView) -> Option<String> {
        self.get_cookie(&self.default_name, req)
    }

    pub fn lookup(&self, name: &str, req: &dyn HeaderView) -> CookieLookup {
        let res = lookup_cookie(name, req);
        counters::inc_cookie_lookup(res.outcome_str());
        res
    }
}

fn lookup_cookie(name: &str, req: &dyn HeaderView) -> CookieLookup {
    let raw = req
        .get_all(COOKIE_HEADER)
        .into_iter()
        .find_map(|header| get_cookie_value(header, name));

    let Some(raw) = raw else {
        return CookieLookup::Missing;
    };

    match decode_base64(raw) {
        Ok(v) => CookieLookup::Found(v),
        Err(e) => {
            // Never log the value itself.
            tracing::warn!(cookie = name, error = %e, "undecodable cookie ignored");
            CookieLookup::Invalid(e)
        }
    }
}
