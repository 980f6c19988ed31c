//! Wall-clock tick drivers. Each driver is a tokio task that synthesizes
//! one intent per firing into the shared engine; the reducer applies each
//! intent atomically, so any interleaving of concurrently-due timers is
//! safe. Timeout-bounded state (the active event, the boost) is cleared
//! by a one-shot follow-up task scheduled when the state is set, not by
//! polling.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

use crate::engine::{now_ms, Engine};
use crate::persist;
use crate::sim::catalog;
use crate::sim::intent::Intent;

type SharedEngine = Arc<Mutex<Engine>>;

/// Handles for every running driver task. `shutdown` (or drop) aborts
/// them all, follow-up one-shots included, so teardown leaves no timers
/// behind.
pub struct TickDrivers {
    engine: SharedEngine,
    tasks: Vec<JoinHandle<()>>,
    followups: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl TickDrivers {
    /// Start the production, market, event, achievement and autosave
    /// drivers against `engine`, saving to `save_path`.
    pub fn spawn(engine: SharedEngine, save_path: PathBuf) -> Self {
        let config = lock(&engine).config().clone();
        let followups = Arc::new(Mutex::new(Vec::new()));

        let tasks = vec![
            spawn_production(engine.clone(), config.production_interval),
            spawn_market(engine.clone(), &config),
            spawn_events(engine.clone(), &config, followups.clone()),
            spawn_achievements(engine.clone(), config.achievement_interval),
            spawn_autosave(engine.clone(), config.autosave_interval, save_path),
        ];

        Self {
            engine,
            tasks,
            followups,
        }
    }

    /// Pay for a production boost and schedule its expiry. No-op if the
    /// boost did not activate (already running, or broke).
    pub fn activate_boost(&self) {
        let duration = {
            let mut engine = lock(&self.engine);
            engine.dispatch(Intent::ActivateBoost);
            if !engine.state().boost_active {
                return;
            }
            engine.config().boost_duration
        };
        let engine = self.engine.clone();
        let handle = tokio::spawn(async move {
            sleep(duration).await;
            lock(&engine).dispatch(Intent::ExpireBoost);
        });
        track(&self.followups, handle);
    }

    /// Abort every driver and pending follow-up timer.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        let mut followups = self.followups.lock().unwrap_or_else(|e| e.into_inner());
        for task in followups.drain(..) {
            task.abort();
        }
        debug!("tick drivers stopped");
    }
}

impl Drop for TickDrivers {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock(engine: &SharedEngine) -> std::sync::MutexGuard<'_, Engine> {
    engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Record a follow-up one-shot, sweeping out handles that already fired
/// so the list stays bounded over a long session.
fn track(followups: &Arc<Mutex<Vec<JoinHandle<()>>>>, handle: JoinHandle<()>) {
    let mut followups = followups.lock().unwrap_or_else(|e| e.into_inner());
    followups.retain(|h| !h.is_finished());
    followups.push(handle);
}

fn spawn_production(engine: SharedEngine, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            lock(&engine).dispatch(Intent::ProductionTick);
        }
    })
}

fn spawn_market(engine: SharedEngine, config: &catalog::EconomyConfig) -> JoinHandle<()> {
    let period = config.market_interval;
    let drift = config.market_drift;
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            let mut engine = lock(&engine);
            let delta = rng.gen_range(-drift..=drift);
            let next = engine.state().market_multiplier + delta;
            engine.dispatch(Intent::UpdateMarket(next));
        }
    })
}

fn spawn_events(
    engine: SharedEngine,
    config: &catalog::EconomyConfig,
    followups: Arc<Mutex<Vec<JoinHandle<()>>>>,
) -> JoinHandle<()> {
    let period = config.event_interval;
    let chance = config.event_chance;
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let pool = catalog::event_pool();
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            let duration = {
                let mut engine = lock(&engine);
                if engine.state().current_event.is_some() || rng.gen_range(0.0..1.0) >= chance {
                    continue;
                }
                let event = pool[rng.gen_range(0..pool.len())].clone();
                let duration = Duration::from_millis(event.duration_ms);
                debug!("market event fired: {}", event.title);
                engine.dispatch(Intent::TriggerEvent(event));
                duration
            };
            // Clear the event after its lifetime; scheduled now, not polled.
            let engine = engine.clone();
            let handle = tokio::spawn(async move {
                sleep(duration).await;
                lock(&engine).dispatch(Intent::ClearEvent);
            });
            track(&followups, handle);
        }
    })
}

fn spawn_achievements(engine: SharedEngine, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            lock(&engine).dispatch(Intent::EvaluateAchievements);
        }
    })
}

fn spawn_autosave(engine: SharedEngine, period: Duration, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            let snapshot = {
                let engine = lock(&engine);
                if !engine.state().settings.auto_save {
                    continue;
                }
                engine.state().clone()
            };
            if let Err(err) = persist::save_game(&snapshot, &path, now_ms()) {
                warn!("autosave failed: {err:#}");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::EconomyConfig;

    fn managed_engine() -> SharedEngine {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = Engine::new(EconomyConfig::default());
        engine.dispatch(Intent::SetMoney(2_000.0));
        engine.dispatch(Intent::BuyProductionLine("line1".into()));
        engine.dispatch(Intent::HireManager("line1".into()));
        Arc::new(Mutex::new(engine))
    }

    #[tokio::test(start_paused = true)]
    async fn production_driver_accrues_passive_income() {
        let engine = managed_engine();
        let dir = tempfile::tempdir().unwrap();
        let mut drivers = TickDrivers::spawn(engine.clone(), dir.path().join(persist::SAVE_FILE));

        let before = lock(&engine).state().money;
        sleep(Duration::from_millis(3_500)).await;
        let after = lock(&engine).state().money;
        assert!(after > before, "three production ticks should pay out");

        drivers.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_all_ticking() {
        let engine = managed_engine();
        let dir = tempfile::tempdir().unwrap();
        let mut drivers = TickDrivers::spawn(engine.clone(), dir.path().join(persist::SAVE_FILE));

        sleep(Duration::from_millis(1_500)).await;
        drivers.shutdown();

        let frozen = lock(&engine).state().clone();
        sleep(Duration::from_secs(120)).await;
        assert_eq!(*lock(&engine).state(), frozen, "no dangling timers");
    }

    #[tokio::test(start_paused = true)]
    async fn autosave_writes_the_slot_when_enabled() {
        let engine = managed_engine();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(persist::SAVE_FILE);
        let _drivers = TickDrivers::spawn(engine.clone(), path.clone());

        sleep(Duration::from_secs(31)).await;
        let saved = persist::load_game(&path).unwrap().expect("slot written");
        assert_eq!(saved.line("line1").unwrap().owned, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn boost_expires_via_follow_up_timer() {
        let engine = managed_engine();
        let dir = tempfile::tempdir().unwrap();
        let drivers = TickDrivers::spawn(engine.clone(), dir.path().join(persist::SAVE_FILE));

        drivers.activate_boost();
        assert!(lock(&engine).state().boost_active);

        sleep(Duration::from_secs(31)).await;
        assert!(!lock(&engine).state().boost_active, "boost expired");
    }

    #[tokio::test(start_paused = true)]
    async fn fired_follow_ups_are_swept_on_the_next_one() {
        let engine = managed_engine();
        let dir = tempfile::tempdir().unwrap();
        let drivers = TickDrivers::spawn(engine.clone(), dir.path().join(persist::SAVE_FILE));

        drivers.activate_boost();
        sleep(Duration::from_secs(31)).await;
        assert!(!lock(&engine).state().boost_active);

        drivers.activate_boost();
        let pending = drivers.followups.lock().unwrap().len();
        assert_eq!(pending, 1, "expired handle was pruned, not accumulated");
    }
}
