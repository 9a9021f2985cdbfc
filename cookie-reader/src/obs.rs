use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;

/// JSONL access sink.
///
/// Active file: `<log_dir>/access.jsonl`, hourly rolling handled by
/// tracing-appender. Buffered lines are flushed when the last clone of the
/// sink is dropped.
#[derive(Clone)]
pub struct ObsSink {
    log_dir: PathBuf,
    access: NonBlocking,
    _guard: Arc<WorkerGuard>,
}

#[derive(Debug, Clone)]
pub struct AccessLog {
    pub ts: DateTime<Utc>,
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub route: &'static str,
    /// Name of the cookie the route asked for, if any.
    pub cookie_name: Option<String>,
    /// `found`, `missing` or `invalid`.
    pub outcome: Option<&'static str>,
    pub status: u16,
    pub latency_us: u64,
}

#[derive(Serialize)]
struct AccessLine<'a> {
    #[serde(rename = "@timestamp")]
    ts: &'a DateTime<Utc>,
    dataset: &'static str,
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    route: &'a str,
    cookie_name: &'a Option<String>,
    outcome: &'a Option<&'static str>,
    status: u16,
    latency_us: u64,
}

impl<'a> From<&'a AccessLog> for AccessLine<'a> {
    fn from(rec: &'a AccessLog) -> Self {
        Self {
            ts: &rec.ts,
            dataset: "access",
            request_id: &rec.request_id,
            method: &rec.method,
            path: &rec.path,
            route: rec.route,
            cookie_name: &rec.cookie_name,
            outcome: &rec.outcome,
            status: rec.status,
            latency_us: rec.latency_us,
        }
    }
}

impl ObsSink {
    pub fn new(log_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("create log_dir failed: {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::hourly(log_dir, "access.jsonl");
        let (access, guard) = tracing_appender::non_blocking(appender);
        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            access,
            _guard: Arc::new(guard),
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Write one access JSONL line. The dataset field is injected here.
    pub fn write_access(&self, rec: &AccessLog) {
        if let Ok(json) = access_json(rec) {
            let mut w = self.access.make_writer();
            let _ = w.write_all(json.as_bytes());
            let _ = w.write_all(b"\n");
        }
    }
}

fn access_json(rec: &AccessLog) -> serde_json::Result<String> {
    serde_json::to_string(&AccessLine::from(rec))
}

/// Every line of every `access.jsonl*` file under `log_dir`.
#[cfg(test)]
pub(crate) fn read_access_lines(log_dir: &Path) -> Vec<serde_json::Value> {
    let mut lines = Vec::new();
    for entry in std::fs::read_dir(log_dir).unwrap() {
        let path = entry.unwrap().path();
        let is_access = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("access.jsonl"));
        if !is_access {
            continue;
        }
        for line in std::fs::read_to_string(&path).unwrap().lines() {
            lines.push(serde_json::from_str(line).unwrap());
        }
    }
    lines
}
