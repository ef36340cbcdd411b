// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal handler trait invoked by the request pipeline.

use async_trait::async_trait;

use crate::error::SomaError;
use crate::types::{AccessContext, Event, Reply};

/// A domain handler: the last stage of the request pipeline.
///
/// Receives the event together with its access annotation. A gated action
/// that was denied still reaches the handler; presenting the subscription
/// gate is the handler's job, not the pipeline's.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &Event, access: &AccessContext) -> Result<Reply, SomaError>;
}
