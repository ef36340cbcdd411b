// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `soma serve` command implementation.
//!
//! Wires the SQLite user store, the access policy, the throttle guard,
//! and the domain router into a request pipeline, then hands the pipeline
//! to the Telegram gateway. Supports graceful shutdown via ctrl-c.

use std::sync::Arc;
use std::time::Duration;

use soma_config::SomaConfig;
use soma_core::{Notifier, SomaError};
use soma_handlers::{HandlerContext, Router};
use soma_policy::{AccessPolicy, RequestPipeline, ThrottleGuard};
use soma_storage::SqliteUserStore;
use soma_telegram::{TelegramChannel, TelegramGateway};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runs the `soma serve` command.
pub async fn run_serve(config: SomaConfig) -> Result<(), SomaError> {
    info!(bot = %config.bot.name, "starting soma serve");

    let store = Arc::new(SqliteUserStore::new(config.storage.clone()));
    store.initialize().await?;

    let mut channel = TelegramChannel::new(&config.telegram)?;
    channel.connect().await?;
    let channel = Arc::new(channel);

    let notifier: Arc<dyn Notifier> = Arc::new(channel.notifier());

    let throttle = ThrottleGuard::new(&config.throttle);
    let access = AccessPolicy::new(
        store.clone(),
        &config.access,
        Duration::from_millis(config.storage.timeout_ms),
    );
    let pipeline = RequestPipeline::new(throttle, access, notifier.clone());

    let router = Arc::new(Router::new(HandlerContext::new(
        store.clone(),
        notifier,
        config.clone(),
    )));

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("ctrl-c received, shutting down");
                signal_cancel.cancel();
            }
            Err(e) => warn!(error = %e, "failed to install ctrl-c handler"),
        }
    });

    TelegramGateway::new(channel, pipeline, router)
        .run(cancel)
        .await;

    store.close().await?;
    info!("soma stopped");
    Ok(())
}
