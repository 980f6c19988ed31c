//! Derived read-only views for the presentation boundary. These are
//! recomputed on demand from a snapshot; nothing here is state.

use super::state::{Achievement, GameState, UnlockMetric, Upgrade};

/// Upgrades whose unlock condition is met against the live metrics.
/// Unconditional upgrades are always visible.
pub fn visible_upgrades(state: &GameState) -> Vec<&Upgrade> {
    let unlocked = state.unlocked_achievements() as f64;
    state
        .upgrades
        .iter()
        .filter(|up| match &up.unlock_condition {
            None => true,
            Some(cond) => {
                let metric = match cond.metric {
                    UnlockMetric::Achievements => unlocked,
                    UnlockMetric::Spent => state.total_spent,
                    UnlockMetric::Prestige => state.prestige_level as f64,
                };
                metric >= cond.value
            }
        })
        .collect()
}

/// The first achievement, every unlocked one, and the next locked goal
/// after an unlocked one: a breadcrumb trail rather than the full list.
pub fn visible_achievements(state: &GameState) -> Vec<&Achievement> {
    state
        .achievements
        .iter()
        .enumerate()
        .filter(|(index, ach)| {
            if *index == 0 || ach.unlocked {
                return true;
            }
            state.achievements[index - 1].unlocked
        })
        .map(|(_, ach)| ach)
        .collect()
}
