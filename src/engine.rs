use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::sim::catalog::EconomyConfig;
use crate::sim::intent::{Intent, Signal};
use crate::sim::reducer::{self, reduce};
use crate::sim::state::GameState;

const MAX_SIGNALS: usize = 32;

/// The owned engine instance: single authoritative `GameState`, mutated
/// only by dispatching intents through the reducer. Each dispatch swaps
/// the state wholesale, so `state()` always hands out a complete,
/// consistent snapshot.
pub struct Engine {
    state: GameState,
    config: EconomyConfig,
    signals: VecDeque<Signal>,
}

impl Engine {
    pub fn new(config: EconomyConfig) -> Self {
        let mut state = crate::sim::catalog::initial_state(&config);
        state.game_start_time = now_ms();
        Self {
            state,
            config,
            signals: VecDeque::with_capacity(MAX_SIGNALS),
        }
    }

    /// Resume from a persisted snapshot, repairing derived fields and
    /// clamped invariants the way a fresh load does.
    pub fn from_state(state: GameState, config: EconomyConfig) -> Self {
        let state = reducer::normalize(state, &config);
        Self {
            state,
            config,
            signals: VecDeque::with_capacity(MAX_SIGNALS),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Apply one intent atomically. Invalid intents leave the state
    /// untouched and emit nothing.
    pub fn dispatch(&mut self, intent: Intent) {
        let (next, signals) = reduce(&self.state, &intent, &self.config);
        self.state = next;
        for signal in signals {
            if self.signals.len() >= MAX_SIGNALS {
                self.signals.pop_front();
            }
            self.signals.push_back(signal);
        }
    }

    /// Drain pending notifications for sound/presentation collaborators.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.signals.drain(..).collect()
    }

    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }
}

/// Wall-clock milliseconds since the Unix epoch, used to stamp intents
/// that carry a timestamp. The reducer itself never calls this.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_replaces_state_and_collects_signals() {
        let mut engine = Engine::new(EconomyConfig::default());
        engine.dispatch(Intent::BuyProductionLine("line1".into()));
        assert_eq!(engine.state().money, 0.0);
        assert_eq!(engine.state().line("line1").unwrap().owned, 1);

        let signals = engine.take_signals();
        assert!(matches!(
            signals.as_slice(),
            [Signal::Purchased { id, cost }] if id == "line1" && *cost == 500.0
        ));
        assert!(engine.take_signals().is_empty());
    }

    #[test]
    fn rejected_intent_emits_no_signal() {
        let mut engine = Engine::new(EconomyConfig::default());
        engine.dispatch(Intent::HireManager("line1".into()));
        assert!(engine.take_signals().is_empty());
    }

    #[test]
    fn from_state_clamps_out_of_band_market() {
        let config = EconomyConfig::default();
        let mut snapshot = crate::sim::catalog::initial_state(&config);
        snapshot.market_multiplier = 5.0;
        let engine = Engine::from_state(snapshot, config);
        assert_eq!(engine.state().market_multiplier, 1.3);
    }

    #[test]
    fn signal_log_is_bounded() {
        let mut engine = Engine::new(EconomyConfig::default());
        engine.dispatch(Intent::SetMoney(1e9));
        for _ in 0..MAX_SIGNALS + 10 {
            engine.dispatch(Intent::BuyProductionLine("line1".into()));
        }
        assert_eq!(engine.signals().count(), MAX_SIGNALS);
    }
}
