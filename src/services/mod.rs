// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - in-process state and outbound delivery.

pub mod cache;
pub mod generation;
pub mod push;
pub mod timer;

pub use cache::PathCache;
pub use generation::GenerationStore;
pub use push::{PushService, PushSubscription};
pub use timer::{RestTimer, TimerRegistry};
