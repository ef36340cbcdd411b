// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The event loop connecting the Telegram channel to the request
//! pipeline.

use std::sync::Arc;

use soma_core::{Event, EventHandler};
use soma_policy::{PipelineOutcome, RequestPipeline};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::TelegramChannel;

/// Consumes inbound events and drives each one through the pipeline.
///
/// Events are processed sequentially in arrival order, which preserves
/// per-user ordering for the throttle guard.
pub struct TelegramGateway {
    channel: Arc<TelegramChannel>,
    pipeline: RequestPipeline,
    handler: Arc<dyn EventHandler>,
}

impl TelegramGateway {
    pub fn new(
        channel: Arc<TelegramChannel>,
        pipeline: RequestPipeline,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            channel,
            pipeline,
            handler,
        }
    }

    /// Run until the cancellation token fires or the inbound queue
    /// closes.
    pub async fn run(&self, cancel: CancellationToken) {
        info!("telegram gateway running");

        loop {
            tokio::select! {
                received = self.channel.receive() => {
                    match received {
                        Ok(event) => self.handle_event(event).await,
                        Err(e) => {
                            error!(error = %e, "inbound queue closed, stopping gateway");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping gateway");
                    break;
                }
            }
        }

        self.channel.shutdown();
        info!("telegram gateway stopped");
    }

    async fn handle_event(&self, event: Event) {
        match self.pipeline.process(&event, self.handler.as_ref()).await {
            PipelineOutcome::Completed(reply) => {
                if let Err(e) = self.channel.send_reply(event.chat_id, &reply).await {
                    warn!(chat_id = event.chat_id, error = %e, "failed to deliver reply");
                }
                if let Some(callback_id) = &event.callback_id {
                    self.channel
                        .answer_callback(callback_id, reply.toast.as_deref())
                        .await;
                }
            }
            // The pipeline already notified the actor; just clear the
            // client-side spinner for callback events.
            PipelineOutcome::Throttled | PipelineOutcome::Failed => {
                if let Some(callback_id) = &event.callback_id {
                    self.channel.answer_callback(callback_id, None).await;
                }
            }
        }
    }
}
