use anyhow::Context;
use clap::Parser;
use cookie_reader::obs::ObsSink;
use cookie_reader::server::{CookieRoutes, CookieSvc};
use cookie_reader::{telemetry, AppConfig, CookieReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "cookie-reader", version, about = "Serves decoded request cookies back to the caller")]
struct Args {
    /// Path to config.yaml (relative paths inside config will be resolved based on this file's directory)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

fn locate_config(p: PathBuf) -> PathBuf {
    if p.exists() || p != Path::new("config.yaml") {
        return p;
    }

    // Fall back to a config shipped next to the binary.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(cand) = exe.parent().map(|dir| dir.join("config.yaml")) {
            if cand.exists() {
                return cand;
            }
        }
    }

    p
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg_path = locate_config(args.config);
    let cfg = AppConfig::load(&cfg_path)
        .with_context(|| format!("load config {}", cfg_path.display()))?;

    let log_dir = cfg.log_dir_path();
    telemetry::init_tracing("cookie-reader", &log_dir)?;
    let obs = ObsSink::new(&log_dir)?;

    let reader = CookieReader::new(&cfg.cookies);
    tracing::info!(default_cookie = reader.default_cookie_name(), "cookie reader ready");

    let routes = CookieRoutes::new(reader).with_obs(obs);
    let svc = CookieSvc::new(cfg.listen_addr(), routes);

    svc.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("ctrl-c handler failed: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}
