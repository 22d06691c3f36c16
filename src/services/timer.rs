// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user rest timer.
//!
//! Each user has at most one countdown. The countdown is a tokio task that
//! ticks once a second; the task is aborted on pause, stop or restart, and a
//! generation counter makes any tick that still slips through a no-op.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use uuid::Uuid;

pub const DEFAULT_REST_SECONDS: u32 = 90;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub time_remaining: u32,
    pub is_running: bool,
}

struct TimerInner {
    state: TimerState,
    remaining: u32,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TimerInner {
    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            time_remaining: self.remaining,
            is_running: self.state == TimerState::Running,
        }
    }

    /// Invalidate the current countdown, if any.
    fn cancel(&mut self) {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Countdown for a single user. Clones share state.
#[derive(Clone)]
pub struct RestTimer {
    inner: Arc<Mutex<TimerInner>>,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerInner {
                state: TimerState::Idle,
                remaining: 0,
                generation: 0,
                task: None,
            })),
        }
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Start counting down from `seconds`, replacing any active countdown.
    pub async fn start(&self, seconds: u32) -> TimerSnapshot {
        let mut inner = self.inner.lock().await;
        inner.cancel();
        inner.remaining = seconds;
        if seconds == 0 {
            inner.state = TimerState::Idle;
        } else {
            inner.state = TimerState::Running;
            self.spawn_ticker(&mut inner);
        }
        inner.snapshot()
    }

    /// Freeze a running countdown. Other states are left as they are.
    pub async fn pause(&self) -> TimerSnapshot {
        let mut inner = self.inner.lock().await;
        if inner.state == TimerState::Running {
            inner.cancel();
            inner.state = TimerState::Paused;
        }
        inner.snapshot()
    }

    /// Continue a paused countdown that has time left.
    pub async fn resume(&self) -> TimerSnapshot {
        let mut inner = self.inner.lock().await;
        if inner.state == TimerState::Paused && inner.remaining > 0 {
            inner.cancel();
            inner.state = TimerState::Running;
            self.spawn_ticker(&mut inner);
        }
        inner.snapshot()
    }

    pub async fn stop(&self) -> TimerSnapshot {
        let mut inner = self.inner.lock().await;
        inner.cancel();
        inner.state = TimerState::Idle;
        inner.remaining = 0;
        inner.snapshot()
    }

    fn spawn_ticker(&self, inner: &mut TimerInner) {
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        inner.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                let mut inner = shared.lock().await;
                if inner.generation != generation || inner.state != TimerState::Running {
                    return;
                }
                inner.remaining = inner.remaining.saturating_sub(1);
                if inner.remaining == 0 {
                    inner.state = TimerState::Idle;
                    inner.task = None;
                    return;
                }
            }
        }));
    }
}

/// All users' timers.
#[derive(Clone, Default)]
pub struct TimerRegistry {
    timers: Arc<DashMap<Uuid, RestTimer>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(&self, user_id: Uuid) -> RestTimer {
        self.timers.entry(user_id).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_exactly_zero() {
        let timer = RestTimer::new();
        let started = timer.start(3).await;
        assert_eq!(started.state, TimerState::Running);
        assert_eq!(started.time_remaining, 3);

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 2);

        sleep(Duration::from_secs(10)).await;
        let done = timer.snapshot().await;
        assert_eq!(done.time_remaining, 0);
        assert_eq!(done.state, TimerState::Idle);
        assert!(!done.is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_leaves_single_countdown() {
        let timer = RestTimer::new();
        timer.start(10).await;
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 8);

        timer.start(5).await;
        // The old ticker would have fired at 3.0s; only the new one at 3.5s counts.
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 4);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume() {
        let timer = RestTimer::new();
        timer.start(10).await;
        sleep(Duration::from_millis(2500)).await;

        let paused = timer.pause().await;
        assert_eq!(paused.state, TimerState::Paused);
        assert_eq!(paused.time_remaining, 8);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 8);

        let resumed = timer.resume().await;
        assert_eq!(resumed.state, TimerState::Running);
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(timer.snapshot().await.time_remaining, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_requires_paused_with_time_left() {
        let timer = RestTimer::new();
        assert_eq!(timer.resume().await.state, TimerState::Idle);

        timer.start(5).await;
        timer.stop().await;
        let after_stop = timer.resume().await;
        assert_eq!(after_stop.state, TimerState::Idle);
        assert_eq!(after_stop.time_remaining, 0);

        // Pausing an idle timer changes nothing.
        assert_eq!(timer.pause().await.state, TimerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_isolates_users() {
        let registry = TimerRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.for_user(a).start(30).await;
        assert_eq!(registry.for_user(a).snapshot().await.time_remaining, 30);
        assert_eq!(registry.for_user(b).snapshot().await.state, TimerState::Idle);
    }
}
