//! The single authoritative state transition. `reduce` is pure: it takes
//! the current state and one intent and returns a complete replacement
//! state plus any notification signals. Invalid intents (unknown ids,
//! insufficient funds, caps reached) return the state unchanged; they
//! are a defensive backstop, never an error path.

use super::catalog::{self, EconomyConfig, Stacking};
use super::economy;
use super::intent::{Intent, Signal};
use super::state::{AchievementMetric, GameState, SettingsPatch};

pub fn reduce(
    state: &GameState,
    intent: &Intent,
    config: &EconomyConfig,
) -> (GameState, Vec<Signal>) {
    let mut next = state.clone();
    let mut signals = Vec::new();

    match intent {
        Intent::SetMoney(amount) => {
            next.money = amount.max(0.0);
        }

        Intent::BuyUpgrade(id) => {
            let Some(index) = next.upgrades.iter().position(|u| u.id == *id) else {
                return (next, signals);
            };
            let charged = next.upgrades[index].cost;
            if next.upgrades[index].is_maxed() || next.money < charged {
                return (next, signals);
            }
            next.money -= charged;
            next.total_spent += charged;
            let (affects, effect, multiplier, owned) = {
                let up = &mut next.upgrades[index];
                up.owned += 1;
                up.cost = economy::escalate(up.cost, config.upgrade_cost_growth);
                up.purchased = up.is_maxed();
                (up.affects.clone(), up.effect, up.multiplier, up.owned)
            };
            // A per-line upgrade folds its stacked factor into the target
            // line's level; global/cost/click targets are read lazily by
            // the income formulas instead.
            if let super::state::UpgradeTarget::Line(line_id) = &affects {
                if let Some(line) = next.production_lines.iter_mut().find(|l| l.id == *line_id) {
                    line.level = match config.stacking {
                        Stacking::Additive => 1.0 + effect * owned as f64,
                        Stacking::Geometric => multiplier.powi(owned as i32),
                    };
                }
            }
            signals.push(Signal::Purchased {
                id: id.clone(),
                cost: charged,
            });
        }

        Intent::BuyProductionLine(id) => {
            let discount = economy::cost_multiplier(&next, config);
            let Some(line) = next.production_lines.iter_mut().find(|l| l.id == *id) else {
                return (next, signals);
            };
            let charged = (line.cost * discount).floor();
            if next.money < charged {
                return (next, signals);
            }
            line.owned += 1;
            line.cost = economy::escalate(line.cost, config.line_cost_growth);
            next.money -= charged;
            next.total_spent += charged;
            signals.push(Signal::Purchased {
                id: id.clone(),
                cost: charged,
            });
        }

        Intent::HireManager(id) => {
            let Some(line) = next.production_lines.iter_mut().find(|l| l.id == *id) else {
                return (next, signals);
            };
            let cost = line.manager_cost;
            if line.manager_hired || next.money < cost {
                return (next, signals);
            }
            line.manager_hired = true;
            next.money -= cost;
            next.total_spent += cost;
            signals.push(Signal::ManagerHired {
                line_id: id.clone(),
            });
        }

        Intent::ClickProduction(id) => {
            let Some(line) = state.line(id) else {
                return (next, signals);
            };
            if line.owned == 0 {
                return (next, signals);
            }
            let income = economy::click_income(line, state, config);
            next.money += income;
            next.total_earned += income;
            signals.push(Signal::Clicked { income });
        }

        Intent::MegaClick => {
            let income: f64 = state
                .production_lines
                .iter()
                .filter(|line| line.owned > 0)
                .map(|line| economy::click_income(line, state, config))
                .sum();
            if income > 0.0 {
                next.money += income;
                next.total_earned += income;
                signals.push(Signal::Clicked { income });
            }
        }

        Intent::ProductionTick => {
            let income: f64 = state
                .production_lines
                .iter()
                .map(|line| economy::passive_income(line, state, config))
                .sum();
            // A zero sum is a valid no-op tick.
            next.money += income;
            next.total_earned += income;
        }

        Intent::UpdateMarket(multiplier) => {
            next.market_multiplier = multiplier.clamp(config.market_min, config.market_max);
        }

        Intent::TriggerEvent(event) => {
            // At most one active event; a second trigger is dropped.
            if next.current_event.is_none() {
                next.current_event = Some(event.clone());
                signals.push(Signal::EventFired {
                    title: event.title.clone(),
                });
            }
        }

        Intent::ClearEvent => {
            if next.current_event.take().is_some() {
                signals.push(Signal::EventEnded);
            }
        }

        Intent::ActivateBoost => {
            if next.boost_active || next.money <= 0.0 {
                return (next, signals);
            }
            let cost = (next.money * config.boost_cost_fraction).floor();
            next.money -= cost;
            next.total_spent += cost;
            next.boost_active = true;
            signals.push(Signal::BoostActivated { cost });
        }

        Intent::ExpireBoost => {
            next.boost_active = false;
        }

        Intent::ClaimAchievement(id) => {
            let Some(ach) = next.achievements.iter_mut().find(|a| a.id == *id) else {
                return (next, signals);
            };
            if !ach.unlocked || ach.claimed {
                return (next, signals);
            }
            ach.claimed = true;
            let reward = ach.reward;
            next.money += reward;
            signals.push(Signal::AchievementClaimed {
                id: id.clone(),
                reward,
            });
        }

        Intent::EvaluateAchievements => {
            let total_units = state.total_units();
            let upgrade_levels = state.total_upgrade_levels();
            for ach in &mut next.achievements {
                ach.progress = match ach.metric {
                    AchievementMetric::Money => state.money,
                    AchievementMetric::TotalEarned => state.total_earned,
                    AchievementMetric::ProductionLines => total_units as f64,
                    AchievementMetric::Upgrades => upgrade_levels as f64,
                    AchievementMetric::Prestige => state.prestige_level as f64,
                };
                if !ach.unlocked && ach.progress >= ach.target {
                    ach.unlocked = true;
                    signals.push(Signal::AchievementUnlocked { id: ach.id.clone() });
                }
            }
        }

        Intent::Prestige { now_ms } => {
            // Gated on lifetime earnings, not current money, so spending
            // down the bankroll cannot dodge the threshold.
            if state.total_earned < config.prestige_threshold {
                return (next, signals);
            }
            let tokens_gained = (state.total_earned / config.prestige_threshold).floor() as u64;
            let mut reset = catalog::initial_state(config);
            reset.prestige_level = state.prestige_level + 1;
            reset.prestige_tokens = state.prestige_tokens + tokens_gained;
            reset.prestige_upgrades = state.prestige_upgrades.clone();
            reset.settings = state.settings.clone();
            reset.last_save = state.last_save;
            reset.game_start_time = *now_ms;
            next = reset;
            signals.push(Signal::Prestiged { tokens_gained });
        }

        Intent::BuyPrestigeUpgrade(id) => {
            let Some(up) = next.prestige_upgrades.iter_mut().find(|u| u.id == *id) else {
                return (next, signals);
            };
            let charged = up.cost.round() as u64;
            if up.is_maxed() || next.prestige_tokens < charged {
                return (next, signals);
            }
            up.owned += 1;
            up.cost += 1.0;
            up.purchased = up.is_maxed();
            next.prestige_tokens -= charged;
            signals.push(Signal::Purchased {
                id: id.clone(),
                cost: charged as f64,
            });
        }

        Intent::UpdateSettings(patch) => {
            apply_settings(&mut next, patch);
        }

        Intent::LoadGame { snapshot, now_ms } => {
            next = normalize((**snapshot).clone(), config);
            next.last_save = *now_ms;
            signals.push(Signal::GameLoaded);
        }

        Intent::ResetGame { now_ms } => {
            next = catalog::initial_state(config);
            next.game_start_time = *now_ms;
            signals.push(Signal::GameReset);
        }
    }

    (next, signals)
}

fn apply_settings(state: &mut GameState, patch: &SettingsPatch) {
    if let Some(sound) = patch.sound_enabled {
        state.settings.sound_enabled = sound;
    }
    if let Some(notifications) = patch.notifications_enabled {
        state.settings.notifications_enabled = notifications;
    }
    if let Some(auto_save) = patch.auto_save {
        state.settings.auto_save = auto_save;
    }
}

/// Repair derived fields and clamp invariants after deserializing a
/// snapshot of unknown provenance. Progress itself self-corrects on the
/// next achievement evaluation.
pub fn normalize(mut state: GameState, config: &EconomyConfig) -> GameState {
    state.money = state.money.max(0.0);
    state.total_earned = state.total_earned.max(0.0);
    state.total_spent = state.total_spent.max(0.0);
    state.market_multiplier = state
        .market_multiplier
        .clamp(config.market_min, config.market_max);
    for up in state
        .upgrades
        .iter_mut()
        .chain(state.prestige_upgrades.iter_mut())
    {
        up.owned = up.owned.min(up.max_level);
        up.purchased = up.owned >= up.max_level;
    }
    for ach in &mut state.achievements {
        if ach.claimed {
            ach.unlocked = true;
        }
    }
    state
}
