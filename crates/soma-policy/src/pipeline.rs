// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered middleware chain every inbound event passes through.
//!
//! Stage order is fixed: log, then throttle, then access annotation, then
//! the domain handler. A throttled request is logged once but never
//! reaches the access check or the handler. A denied gated request still
//! reaches its handler; the annotation tells it to present the gate.

use std::sync::Arc;

use soma_core::{Event, EventHandler, Notifier, Reply};
use tracing::{error, info};

use crate::access::AccessPolicy;
use crate::throttle::{Admission, ThrottleGuard};

/// Transient notice shown to a throttled user.
pub const THROTTLE_NOTICE: &str = "⏱ Please wait a moment before your next action.";

/// Generic notice shown when a handler fails unexpectedly.
pub const UNAVAILABLE_NOTICE: &str = "Service is temporarily unavailable. Please try again later.";

/// Event text and action summaries are truncated to this many characters
/// in logs.
const LOG_SUMMARY_CHARS: usize = 50;

/// How one trip through the pipeline ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The handler ran and produced a reply.
    Completed(Reply),
    /// Dropped by the throttle guard; the actor was notified.
    Throttled,
    /// The handler failed; the actor got a generic notice.
    Failed,
}

/// The middleware chain wrapping every inbound interaction.
pub struct RequestPipeline {
    throttle: ThrottleGuard,
    access: AccessPolicy,
    notifier: Arc<dyn Notifier>,
}

impl RequestPipeline {
    pub fn new(throttle: ThrottleGuard, access: AccessPolicy, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            throttle,
            access,
            notifier,
        }
    }

    /// Run one event through the chain.
    ///
    /// Never returns an error: every internal fault resolves to a safe
    /// outcome and a user-visible notice where appropriate.
    pub async fn process(&self, event: &Event, handler: &dyn EventHandler) -> PipelineOutcome {
        // Log stage. Runs before throttling, so rejected spam still
        // appears once in the logs.
        let text_summary = event.text.as_deref().map(truncate).unwrap_or_default();
        info!(
            actor = %event.actor(),
            kind = %event.kind,
            action = %truncate(&event.action),
            text = %text_summary,
            "inbound event"
        );

        // Throttle stage.
        if self.throttle.admit(event.user_id) == Admission::Reject {
            self.notifier.notify(event.user_id, THROTTLE_NOTICE).await;
            return PipelineOutcome::Throttled;
        }

        // Access-annotation stage. Annotates, never halts.
        let access = self.access.annotate(event.user_id, &event.action).await;

        // Handler stage.
        match handler.handle(event, &access).await {
            Ok(reply) => PipelineOutcome::Completed(reply),
            Err(e) => {
                error!(actor = %event.actor(), action = %event.action, error = %e, "handler failed");
                self.notifier.notify(event.user_id, UNAVAILABLE_NOTICE).await;
                PipelineOutcome::Failed
            }
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= LOG_SUMMARY_CHARS {
        text.to_string()
    } else {
        text.chars().take(LOG_SUMMARY_CHARS).collect()
    }
}
