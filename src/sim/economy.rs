//! Pure cost/production math and number formatting. Multipliers compose
//! multiplicatively across independent systems (market, event, boost,
//! global upgrades, prestige) and additively within one upgrade's levels.

use super::catalog::{EconomyConfig, Stacking};
use super::state::{EventEffect, GameState, ProductionLine, Upgrade, UpgradeTarget};

/// Price after one more purchase on a geometric curve.
pub fn escalate(cost: f64, growth: f64) -> f64 {
    (cost * growth).floor()
}

/// Contribution of a single upgrade across its owned levels.
pub fn stack_factor(upgrade: &Upgrade, stacking: Stacking) -> f64 {
    if upgrade.owned == 0 {
        return 1.0;
    }
    match stacking {
        Stacking::Additive => 1.0 + upgrade.effect * upgrade.owned as f64,
        Stacking::Geometric => upgrade.multiplier.powi(upgrade.owned as i32),
    }
}

fn combined_factor<'a, I>(upgrades: I, stacking: Stacking) -> f64
where
    I: Iterator<Item = &'a Upgrade>,
{
    upgrades.fold(1.0, |acc, u| acc * stack_factor(u, stacking))
}

/// Global output multiplier from "all"-targeted money and prestige
/// upgrades plus the per-prestige-level bonus.
pub fn global_multiplier(state: &GameState, config: &EconomyConfig) -> f64 {
    let all = combined_factor(
        state
            .upgrades
            .iter()
            .chain(state.prestige_upgrades.iter())
            .filter(|u| u.affects == UpgradeTarget::All),
        config.stacking,
    );
    let prestige_bonus = state
        .upgrades
        .iter()
        .filter(|u| u.affects == UpgradeTarget::Prestige && u.owned > 0)
        .fold(1.0, |acc, u| {
            acc * (1.0 + u.effect * u.owned as f64 * state.prestige_level as f64)
        });
    all * prestige_bonus
}

/// Discount factor applied to charged prices. Cost-targeted upgrades
/// carry negative effects, so this is at most 1 once any are owned.
pub fn cost_multiplier(state: &GameState, config: &EconomyConfig) -> f64 {
    combined_factor(
        state
            .upgrades
            .iter()
            .chain(state.prestige_upgrades.iter())
            .filter(|u| u.affects == UpgradeTarget::Cost),
        config.stacking,
    )
    .max(0.0)
}

pub fn click_multiplier(state: &GameState, config: &EconomyConfig) -> f64 {
    combined_factor(
        state
            .upgrades
            .iter()
            .filter(|u| u.affects == UpgradeTarget::Click),
        config.stacking,
    )
}

fn event_multiplier(state: &GameState) -> f64 {
    state.current_event.as_ref().map_or(1.0, |e| e.multiplier)
}

/// Income from one manual click on an owned line.
pub fn click_income(line: &ProductionLine, state: &GameState, config: &EconomyConfig) -> f64 {
    let event = match &state.current_event {
        Some(e) if e.effect == EventEffect::Production => e.multiplier,
        _ => 1.0,
    };
    line.base_production
        * line.level
        * state.market_multiplier
        * event
        * click_multiplier(state, config)
}

/// Passive income per production tick for a single managed line.
pub fn passive_income(line: &ProductionLine, state: &GameState, config: &EconomyConfig) -> f64 {
    if line.owned == 0 || !line.manager_hired {
        return 0.0;
    }
    let boost = if state.boost_active {
        config.boost_multiplier
    } else {
        1.0
    };
    line.owned as f64
        * line.base_production
        * line.level
        * state.market_multiplier
        * event_multiplier(state)
        * boost
        * global_multiplier(state, config)
}

/// Human-readable money string with K/M/B/T suffixes.
pub fn format_number(value: f64) -> String {
    let abs = value.abs();
    if abs < 1_000.0 {
        format!("{value:.2}")
    } else if abs < 1_000_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else if abs < 1_000_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs < 1_000_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else {
        format!("{:.2}T", value / 1_000_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{self, EconomyConfig};

    fn setup() -> (GameState, EconomyConfig) {
        let config = EconomyConfig::default();
        (catalog::initial_state(&config), config)
    }

    #[test]
    fn line_cost_curve_matches_geometric_floor() {
        let mut cost = 500.0;
        let mut charged = Vec::new();
        for _ in 0..3 {
            charged.push(cost);
            cost = escalate(cost, 1.15);
        }
        assert_eq!(charged, vec![500.0, 575.0, 661.0]);
    }

    #[test]
    fn same_upgrade_levels_stack_additively() {
        let mut up = catalog::initial_upgrades().remove(0); // +20% per level
        up.owned = 3;
        let factor = stack_factor(&up, Stacking::Additive);
        assert!((factor - 1.6).abs() < 1e-9, "expected 1 + 0.2*3, not 1.2^3");
        let geometric = stack_factor(&up, Stacking::Geometric);
        assert!((geometric - 1.2f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn passive_income_requires_manager() {
        let (mut state, config) = setup();
        state.production_lines[0].owned = 2;
        assert_eq!(
            passive_income(&state.production_lines[0], &state, &config),
            0.0
        );

        state.production_lines[0].manager_hired = true;
        let income = passive_income(&state.production_lines[0], &state, &config);
        assert!((income - 2.0 * 5.0).abs() < 1e-9);
    }

    #[test]
    fn boost_and_market_compose_multiplicatively() {
        let (mut state, config) = setup();
        state.production_lines[0].owned = 1;
        state.production_lines[0].manager_hired = true;
        state.market_multiplier = 1.2;
        state.boost_active = true;
        let income = passive_income(&state.production_lines[0], &state, &config);
        assert!((income - 5.0 * 1.2 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn click_income_ignores_non_production_events() {
        let (mut state, config) = setup();
        state.production_lines[0].owned = 1;
        let base = click_income(&state.production_lines[0], &state, &config);
        assert!((base - 5.0).abs() < 1e-9);

        // Market-flavored event leaves clicks alone.
        state.current_event = Some(catalog::event_pool().remove(1));
        let with_market_event = click_income(&state.production_lines[0], &state, &config);
        assert!((with_market_event - 5.0).abs() < 1e-9);

        // Production event scales clicks by its multiplier.
        state.current_event = Some(catalog::event_pool().remove(0));
        let with_production_event = click_income(&state.production_lines[0], &state, &config);
        assert!((with_production_event - 6.0).abs() < 1e-9);
    }

    #[test]
    fn formats_magnitudes() {
        assert_eq!(format_number(512.5), "512.50");
        assert_eq!(format_number(1_500.0), "1.50K");
        assert_eq!(format_number(2_500_000.0), "2.50M");
        assert_eq!(format_number(3_000_000_000.0), "3.00B");
        assert_eq!(format_number(4_200_000_000_000.0), "4.20T");
    }
}
