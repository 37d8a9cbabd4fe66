//! Wall-clock driven world running on a dedicated tick thread.
//!
//! [`RealtimeWorld`] moves a [`LockstepWorld`] onto a background thread
//! that ticks it at a fixed rate and publishes a [`WorldView`] after every
//! tick. Views travel over a bounded crossbeam channel; when the reader
//! falls behind, frames are dropped rather than queued.
//!
//! Shutdown sets a flag, joins the thread, and hands the world back.
//! Dropping a `RealtimeWorld` performs the same shutdown and discards the
//! world.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::config::{validate_tick_rate, ConfigError, WorldConfig};
use crate::view::WorldView;
use crate::world::LockstepWorld;

/// Frames buffered between the tick thread and the reader.
const VIEW_CHANNEL_CAPACITY: usize = 4;

/// A world ticking on its own thread.
pub struct RealtimeWorld {
    views: Receiver<WorldView>,
    shutdown_flag: Arc<AtomicBool>,
    tick_thread: Option<JoinHandle<LockstepWorld>>,
    tick_budget: Duration,
}

impl RealtimeWorld {
    /// Generate a world from `config` and start ticking it.
    ///
    /// `config.tick_rate_hz` is required.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let hz = config.tick_rate_hz.ok_or(ConfigError::MissingTickRate)?;
        let world = LockstepWorld::new(config)?;
        Self::spawn(world, hz)
    }

    /// Start ticking an existing world at `tick_rate_hz`.
    pub fn spawn(world: LockstepWorld, tick_rate_hz: f64) -> Result<Self, ConfigError> {
        validate_tick_rate(tick_rate_hz)?;
        let tick_budget = Duration::from_secs_f64(1.0 / tick_rate_hz);
        let (tx, views) = crossbeam_channel::bounded(VIEW_CHANNEL_CAPACITY);
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        let thread_flag = Arc::clone(&shutdown_flag);
        let tick_thread = thread::Builder::new()
            .name("gridwalk-tick".into())
            .spawn(move || tick_loop(world, tx, thread_flag, tick_budget))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        tracing::info!(tick_rate_hz, "tick thread started");
        Ok(Self {
            views,
            shutdown_flag,
            tick_thread: Some(tick_thread),
            tick_budget,
        })
    }

    /// Target duration of one tick.
    pub fn tick_budget(&self) -> Duration {
        self.tick_budget
    }

    /// Most recent view published, discarding any older ones queued.
    ///
    /// `None` if nothing arrived since the last call.
    pub fn latest_view(&self) -> Option<WorldView> {
        self.views.try_iter().last()
    }

    /// Wait up to `timeout` for the next view.
    pub fn recv_view_timeout(&self, timeout: Duration) -> Option<WorldView> {
        match self.views.recv_timeout(timeout) {
            Ok(view) => Some(view),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Whether the tick thread is still running.
    pub fn is_running(&self) -> bool {
        self.tick_thread
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the tick thread and take the world back.
    ///
    /// Returns [`ConfigError::EngineRecoveryFailed`] if the tick thread
    /// panicked.
    pub fn shutdown(mut self) -> Result<LockstepWorld, ConfigError> {
        self.stop().ok_or(ConfigError::EngineRecoveryFailed)
    }

    fn stop(&mut self) -> Option<LockstepWorld> {
        self.shutdown_flag.store(true, Ordering::Release);
        let handle = self.tick_thread.take()?;
        handle.thread().unpark();
        match handle.join() {
            Ok(world) => {
                tracing::info!(tick = %world.current_tick(), "tick thread stopped");
                Some(world)
            }
            Err(_) => {
                tracing::error!("tick thread panicked");
                None
            }
        }
    }
}

impl Drop for RealtimeWorld {
    fn drop(&mut self) {
        if self.tick_thread.is_some() {
            self.stop();
        }
    }
}

fn tick_loop(
    mut world: LockstepWorld,
    tx: Sender<WorldView>,
    shutdown_flag: Arc<AtomicBool>,
    tick_budget: Duration,
) -> LockstepWorld {
    while !shutdown_flag.load(Ordering::Acquire) {
        let started = Instant::now();
        world.tick();
        match tx.try_send(world.view()) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }
        let elapsed = started.elapsed();
        if elapsed < tick_budget {
            thread::park_timeout(tick_budget - elapsed);
        }
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::TickId;

    fn fast_config() -> WorldConfig {
        WorldConfig {
            rows: 12,
            cols: 12,
            agent_count: 3,
            seed: 7,
            tick_rate_hz: Some(500.0),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn missing_tick_rate_rejected() {
        let cfg = WorldConfig {
            tick_rate_hz: None,
            ..fast_config()
        };
        assert!(matches!(
            RealtimeWorld::new(cfg),
            Err(ConfigError::MissingTickRate)
        ));
    }

    #[test]
    fn bad_tick_rate_rejected() {
        let world = LockstepWorld::new(fast_config()).unwrap();
        assert!(matches!(
            RealtimeWorld::spawn(world, 0.0),
            Err(ConfigError::InvalidTickRate { .. })
        ));
    }

    #[test]
    fn publishes_views_and_returns_world() {
        let rt = RealtimeWorld::new(fast_config()).unwrap();
        assert_eq!(rt.tick_budget(), Duration::from_millis(2));
        let view = rt
            .recv_view_timeout(Duration::from_secs(5))
            .expect("no view within 5s");
        assert!(view.tick() >= TickId(1));
        assert!(rt.is_running());

        let world = rt.shutdown().unwrap();
        assert!(world.current_tick() >= view.tick());
    }

    #[test]
    fn ticks_match_lockstep_replay() {
        let rt = RealtimeWorld::new(fast_config()).unwrap();
        rt.recv_view_timeout(Duration::from_secs(5)).unwrap();
        let world = rt.shutdown().unwrap();

        let mut replay = LockstepWorld::new(fast_config()).unwrap();
        replay.run(world.current_tick().0);
        assert_eq!(replay.view(), world.view());
    }

    #[test]
    fn drop_stops_thread() {
        let rt = RealtimeWorld::new(fast_config()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        drop(rt);
        // If this doesn't hang, shutdown worked.
    }
}
