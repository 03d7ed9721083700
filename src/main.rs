/*
 *  main.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Single-shot render: fetch, compose, push to the panel
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */
use std::sync::{Arc, Mutex, TryLockError};

use anyhow::Context;
use chrono::Utc;
use env_logger::Env;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind};

use inkdash::build_info::{BUILD_DATE, BUILD_TARGET};
use inkdash::config::{self, Config};
use inkdash::display::{self, BoxedDriver, EinkDriver};
use inkdash::feeds::FeedClient;
use inkdash::screen;

type SharedDriver = Arc<Mutex<BoxedDriver>>;

async fn run(cfg: &Config, driver: SharedDriver) -> anyhow::Result<()> {
    let client = FeedClient::new(&cfg.http).context("building HTTP client")?;
    let canvas = screen::render_screen(&client, cfg, Utc::now()).await;

    // SPI transfers and busy waits block for the whole refresh
    tokio::task::spawn_blocking(move || {
        let mut guard = driver.lock().unwrap_or_else(|e| e.into_inner());
        display::show(&mut **guard, &canvas)
    })
    .await
    .context("display task")?
    .context("updating panel")?;
    Ok(())
}

/// Put the panel to sleep unless a refresh still holds it.
fn release(driver: &SharedDriver) {
    let mut guard = match driver.try_lock() {
        Ok(g) => g,
        Err(TryLockError::Poisoned(e)) => e.into_inner(),
        Err(TryLockError::WouldBlock) => {
            warn!("Panel is mid-refresh, exiting without shutdown");
            return;
        }
    };
    if let Err(e) = guard.shutdown() {
        error!("Panel shutdown failed: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = config::load();
    let level = match &loaded {
        Ok(cfg) => cfg.log_level.clone().unwrap_or_else(|| "info".to_string()),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!(
        "{} v{} built {} for {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_TARGET
    );

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let driver: SharedDriver = match display::create_driver(&cfg.display) {
        Ok(d) => Arc::new(Mutex::new(d)),
        Err(e) => {
            error!("Display unavailable: {}", e);
            std::process::exit(1);
        }
    };

    let mut sigint = signal(SignalKind::interrupt()).context("installing SIGINT handler")?;
    let mut sigterm = signal(SignalKind::terminate()).context("installing SIGTERM handler")?;

    tokio::select! {
        res = run(&cfg, Arc::clone(&driver)) => {
            if let Err(e) = res {
                error!("{:#}", e);
                std::process::exit(1);
            }
            info!("Dashboard updated");
        }
        _ = sigint.recv() => {
            info!("SIGINT received. Shutting down the panel.");
            release(&driver);
            std::process::exit(130);
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Shutting down the panel.");
            release(&driver);
            std::process::exit(143);
        }
    }
    Ok(())
}
