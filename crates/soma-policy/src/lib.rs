// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access decisions, request throttling, and the middleware pipeline for
//! the Soma bot.
//!
//! This crate holds the stateful core of the bot:
//! - [`AccessPolicy`]: free/gated classification and the fail-closed
//!   subscription check with lazy expiry correction.
//! - [`ThrottleGuard`]: per-user minimum-spacing limiter with incremental
//!   garbage collection.
//! - [`RequestPipeline`]: the ordered log → throttle → access-annotate →
//!   handler chain.

pub mod access;
pub mod clock;
pub mod pipeline;
pub mod throttle;

pub use access::{AccessPolicy, correct_expiry};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use pipeline::{PipelineOutcome, RequestPipeline, THROTTLE_NOTICE, UNAVAILABLE_NOTICE};
pub use throttle::{Admission, ThrottleGuard};
