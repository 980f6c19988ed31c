use super::state::{GameState, MarketEvent, SettingsPatch};

/// A discrete request to change game state. Every variant is handled
/// synchronously and atomically by [`super::reducer::reduce`]; variants
/// that need wall-clock time carry it explicitly (`now_ms`, Unix millis)
/// so the reducer never reads a clock itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Overwrite the bankroll (clamped to zero).
    SetMoney(f64),
    BuyUpgrade(String),
    BuyProductionLine(String),
    HireManager(String),
    ClickProduction(String),
    /// One click of income for every owned line, in tier order.
    MegaClick,
    /// Passive income pass for every managed line.
    ProductionTick,
    UpdateMarket(f64),
    TriggerEvent(MarketEvent),
    ClearEvent,
    /// Pay a fraction of current money for a timed production boost.
    /// Expiry is a follow-up `ExpireBoost`, scheduled at activation time.
    ActivateBoost,
    ExpireBoost,
    ClaimAchievement(String),
    /// Recompute every achievement's progress from its live metric.
    EvaluateAchievements,
    Prestige { now_ms: u64 },
    BuyPrestigeUpgrade(String),
    UpdateSettings(SettingsPatch),
    LoadGame { snapshot: Box<GameState>, now_ms: u64 },
    ResetGame { now_ms: u64 },
}

/// Abstract notification emitted alongside a state transition, for sound
/// and presentation collaborators. Purely informational; the reducer's
/// output state is the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Purchased { id: String, cost: f64 },
    ManagerHired { line_id: String },
    Clicked { income: f64 },
    EventFired { title: String },
    EventEnded,
    BoostActivated { cost: f64 },
    AchievementUnlocked { id: String },
    AchievementClaimed { id: String, reward: f64 },
    Prestiged { tokens_gained: u64 },
    GameLoaded,
    GameReset,
}
