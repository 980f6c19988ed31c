use serde::{Deserialize, Serialize};

use super::catalog;

/// Production tier: owned units generate income when clicked, or passively
/// once a manager is hired. Identity (`id`) is stable across the whole
/// session; insertion order is tier order and drives mega-click iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLine {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_production: f64,
    pub base_cost: f64,
    /// Current escalating price; grows geometrically per unit owned.
    pub cost: f64,
    pub owned: u32,
    pub manager_hired: bool,
    pub manager_cost: f64,
    /// Per-line output scale, starting at 1.0. Only per-line upgrades move
    /// it; stored as a float because upgrades scale it fractionally.
    pub level: f64,
    pub icon: String,
    pub color: String,
}

/// What an upgrade's multiplier applies to. Persists as a bare string
/// ("all", "cost", "click", "prestige", or a line id) so the save layout
/// stays flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeTarget {
    /// A specific production line, by id.
    Line(String),
    /// Every line's passive production.
    All,
    /// Purchase prices (negative effect = discount).
    Cost,
    /// Manual click income.
    Click,
    /// Scales with prestige level.
    Prestige,
}

impl UpgradeTarget {
    pub fn as_str(&self) -> &str {
        match self {
            UpgradeTarget::Line(id) => id,
            UpgradeTarget::All => "all",
            UpgradeTarget::Cost => "cost",
            UpgradeTarget::Click => "click",
            UpgradeTarget::Prestige => "prestige",
        }
    }
}

impl From<&str> for UpgradeTarget {
    fn from(tag: &str) -> Self {
        match tag {
            "all" => UpgradeTarget::All,
            "cost" => UpgradeTarget::Cost,
            "click" => UpgradeTarget::Click,
            "prestige" => UpgradeTarget::Prestige,
            other => UpgradeTarget::Line(other.to_string()),
        }
    }
}

impl Serialize for UpgradeTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UpgradeTarget {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(UpgradeTarget::from(tag.as_str()))
    }
}

/// Gate that hides an upgrade from the store until a metric is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockCondition {
    #[serde(rename = "type")]
    pub metric: UnlockMetric,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockMetric {
    Achievements,
    Spent,
    Prestige,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: f64,
    /// Per-level effect as a delta (0.2 = +20%). `multiplier` is the same
    /// thing expressed as a factor; both are kept for the save layout.
    pub effect: f64,
    pub multiplier: f64,
    pub owned: u32,
    pub max_level: u32,
    pub affects: UpgradeTarget,
    /// Derived (`owned >= max_level`), stored for save-format stability.
    pub purchased: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_condition: Option<UnlockCondition>,
}

impl Upgrade {
    pub fn is_maxed(&self) -> bool {
        self.owned >= self.max_level
    }
}

/// Live metric an achievement tracks. Progress is always recomputed from
/// the metric, never incremented, so it self-corrects after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMetric {
    Money,
    TotalEarned,
    ProductionLines,
    Upgrades,
    Prestige,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub reward: f64,
    pub target: f64,
    #[serde(rename = "type")]
    pub metric: AchievementMetric,
    pub progress: f64,
    /// Monotonic: once true, never reset within a prestige cycle.
    pub unlocked: bool,
    /// Monotonic; reward pays out exactly once, at claim time.
    pub claimed: bool,
}

/// Tag naming which subsystem an event's multiplier touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventEffect {
    Production,
    Market,
    Income,
    Cost,
}

/// Timed modifier; at most one is active at a time and a follow-up timer
/// clears it after `duration_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvent {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub effect: EventEffect,
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
    pub auto_save: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: true,
            auto_save: true,
        }
    }
}

/// Partial settings patch; `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub sound_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub auto_save: Option<bool>,
}

/// Root aggregate. Mutated exclusively through the reducer, which replaces
/// it wholesale; readers always see a complete consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub money: f64,
    /// Lifetime income; non-decreasing, gates prestige.
    pub total_earned: f64,
    /// Lifetime expenditure; non-decreasing.
    pub total_spent: f64,
    pub production_lines: Vec<ProductionLine>,
    pub upgrades: Vec<Upgrade>,
    pub achievements: Vec<Achievement>,
    pub current_event: Option<MarketEvent>,
    /// Global drifting modifier, clamped to the configured band.
    pub market_multiplier: f64,
    pub prestige_level: u32,
    pub prestige_tokens: u64,
    /// Survive prestige resets; only "new game" rebuilds them.
    pub prestige_upgrades: Vec<Upgrade>,
    pub boost_active: bool,
    pub settings: GameSettings,
    pub last_save: u64,
    pub game_start_time: u64,
}

impl Default for GameState {
    fn default() -> Self {
        catalog::initial_state(&catalog::EconomyConfig::default())
    }
}

impl GameState {
    pub fn line(&self, id: &str) -> Option<&ProductionLine> {
        self.production_lines.iter().find(|l| l.id == id)
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Total units owned across all lines.
    pub fn total_units(&self) -> u32 {
        self.production_lines.iter().map(|l| l.owned).sum()
    }

    /// Total upgrade levels purchased (money upgrades only).
    pub fn total_upgrade_levels(&self) -> u32 {
        self.upgrades.iter().map(|u| u.owned).sum()
    }

    pub fn unlocked_achievements(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}
