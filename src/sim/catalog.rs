//! Static economy definitions: the production tiers, upgrade tables,
//! achievement list and random event pool the reducer consults, plus the
//! balancing constants grouped into [`EconomyConfig`].

use std::time::Duration;

use super::state::{
    Achievement, AchievementMetric, EventEffect, GameSettings, GameState, MarketEvent,
    ProductionLine, UnlockCondition, UnlockMetric, Upgrade, UpgradeTarget,
};

/// How repeated purchases of the same upgrade stack onto its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    /// `1 + effect * owned`, the shipped balancing choice.
    Additive,
    /// `multiplier ^ owned`, steeper; kept switchable for tuning.
    Geometric,
}

/// Balancing constants. Thresholds and curve factors are configuration,
/// not hardwired law; defaults follow the shipped economy.
#[derive(Debug, Clone)]
pub struct EconomyConfig {
    pub starting_money: f64,
    /// Production-line price growth per unit owned.
    pub line_cost_growth: f64,
    /// Money-upgrade price growth per level.
    pub upgrade_cost_growth: f64,
    /// Lifetime earnings required per prestige token.
    pub prestige_threshold: f64,
    pub market_min: f64,
    pub market_max: f64,
    /// Half-width of the uniform drift applied each market tick.
    pub market_drift: f64,
    /// Chance of an event firing on each roll while none is active.
    pub event_chance: f64,
    pub boost_multiplier: f64,
    pub boost_duration: Duration,
    /// Fraction of current money charged to activate a boost.
    pub boost_cost_fraction: f64,
    pub stacking: Stacking,
    pub production_interval: Duration,
    pub market_interval: Duration,
    pub event_interval: Duration,
    pub achievement_interval: Duration,
    pub autosave_interval: Duration,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 500.0,
            line_cost_growth: 1.15,
            upgrade_cost_growth: 1.5,
            prestige_threshold: 10_000_000.0,
            market_min: 0.7,
            market_max: 1.3,
            market_drift: 0.15,
            event_chance: 0.10,
            boost_multiplier: 3.0,
            boost_duration: Duration::from_secs(30),
            boost_cost_fraction: 0.1,
            stacking: Stacking::Additive,
            production_interval: Duration::from_secs(1),
            market_interval: Duration::from_secs(15),
            event_interval: Duration::from_secs(30),
            achievement_interval: Duration::from_secs(2),
            autosave_interval: Duration::from_secs(30),
        }
    }
}

struct LineDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    base_production: f64,
    base_cost: f64,
    manager_cost: f64,
    icon: &'static str,
    color: &'static str,
}

const LINE_DEFS: [LineDef; 6] = [
    LineDef {
        id: "line1",
        name: "Silicon Smelters",
        description: "Basic silicon processing units",
        base_production: 5.0,
        base_cost: 500.0,
        manager_cost: 1_000.0,
        icon: "smelter",
        color: "red",
    },
    LineDef {
        id: "line2",
        name: "Wafer Fabricators",
        description: "Advanced wafer manufacturing",
        base_production: 25.0,
        base_cost: 2_500.0,
        manager_cost: 5_000.0,
        icon: "wafer",
        color: "blue",
    },
    LineDef {
        id: "line3",
        name: "Chip Assemblers",
        description: "High-tech chip assembly lines",
        base_production: 120.0,
        base_cost: 10_000.0,
        manager_cost: 20_000.0,
        icon: "chip",
        color: "green",
    },
    LineDef {
        id: "line4",
        name: "Quantum Processors",
        description: "Cutting-edge quantum computing",
        base_production: 700.0,
        base_cost: 50_000.0,
        manager_cost: 100_000.0,
        icon: "quantum",
        color: "purple",
    },
    LineDef {
        id: "line5",
        name: "AI Supercomputers",
        description: "Revolutionary AI processing units",
        base_production: 3_500.0,
        base_cost: 250_000.0,
        manager_cost: 500_000.0,
        icon: "ai",
        color: "amber",
    },
    LineDef {
        id: "line6",
        name: "Neural Networks",
        description: "Next-gen neural processing",
        base_production: 15_000.0,
        base_cost: 1_000_000.0,
        manager_cost: 2_000_000.0,
        icon: "neural",
        color: "violet",
    },
];

pub fn initial_lines() -> Vec<ProductionLine> {
    LINE_DEFS
        .iter()
        .map(|def| ProductionLine {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            base_production: def.base_production,
            base_cost: def.base_cost,
            cost: def.base_cost,
            owned: 0,
            manager_hired: false,
            manager_cost: def.manager_cost,
            level: 1.0,
            icon: def.icon.to_string(),
            color: def.color.to_string(),
        })
        .collect()
}

fn upgrade(
    id: &str,
    name: &str,
    description: &str,
    cost: f64,
    effect: f64,
    max_level: u32,
    affects: UpgradeTarget,
    unlock_condition: Option<UnlockCondition>,
) -> Upgrade {
    Upgrade {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        effect,
        multiplier: 1.0 + effect,
        owned: 0,
        max_level,
        affects,
        purchased: false,
        unlock_condition,
    }
}

pub fn initial_upgrades() -> Vec<Upgrade> {
    vec![
        upgrade(
            "upgrade1",
            "Efficient Smelting",
            "Silicon Smelters produce 20% more silicon.",
            1_000.0,
            0.2,
            5,
            UpgradeTarget::Line("line1".into()),
            None,
        ),
        upgrade(
            "upgrade2",
            "Advanced Fabrication",
            "Wafer Fabricators produce 30% more wafers.",
            5_000.0,
            0.3,
            5,
            UpgradeTarget::Line("line2".into()),
            None,
        ),
        upgrade(
            "upgrade3",
            "Optimized Assembly",
            "Chip Assemblers produce 40% more chips.",
            20_000.0,
            0.4,
            5,
            UpgradeTarget::Line("line3".into()),
            None,
        ),
        upgrade(
            "upgrade4",
            "Quantum Optimization",
            "Quantum Processors produce 50% more output.",
            100_000.0,
            0.5,
            5,
            UpgradeTarget::Line("line4".into()),
            None,
        ),
        upgrade(
            "upgrade5",
            "AI Enhancement",
            "AI Supercomputers produce 60% more AI power.",
            500_000.0,
            0.6,
            5,
            UpgradeTarget::Line("line5".into()),
            None,
        ),
        upgrade(
            "upgrade6",
            "Global Marketing",
            "Increase all production by 10%.",
            750_000.0,
            0.1,
            5,
            UpgradeTarget::All,
            Some(UnlockCondition {
                metric: UnlockMetric::Spent,
                value: 500_000.0,
            }),
        ),
        upgrade(
            "upgrade7",
            "Government Subsidies",
            "Reduce all production costs by 15%.",
            1_250_000.0,
            -0.15,
            5,
            UpgradeTarget::Cost,
            Some(UnlockCondition {
                metric: UnlockMetric::Achievements,
                value: 5.0,
            }),
        ),
        upgrade(
            "upgrade8",
            "Prestige Production",
            "Increase all production by 5% per prestige level.",
            2_500_000.0,
            0.05,
            1,
            UpgradeTarget::Prestige,
            Some(UnlockCondition {
                metric: UnlockMetric::Prestige,
                value: 1.0,
            }),
        ),
        upgrade(
            "upgrade9",
            "Overclocked Clickers",
            "Manual clicks yield 25% more per level.",
            10_000.0,
            0.25,
            5,
            UpgradeTarget::Click,
            None,
        ),
    ]
}

pub fn initial_prestige_upgrades() -> Vec<Upgrade> {
    vec![
        upgrade(
            "prestige1",
            "Enhanced Automation",
            "Increase base production by 10% per level.",
            1.0,
            0.1,
            5,
            UpgradeTarget::All,
            None,
        ),
        upgrade(
            "prestige2",
            "Skilled Workforce",
            "Reduce production costs by 5% per level.",
            1.0,
            -0.05,
            5,
            UpgradeTarget::Cost,
            None,
        ),
    ]
}

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    reward: f64,
    target: f64,
    metric: AchievementMetric,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        reward,
        target,
        metric,
        progress: 0.0,
        unlocked: false,
        claimed: false,
    }
}

pub fn initial_achievements() -> Vec<Achievement> {
    vec![
        achievement(
            "ach1",
            "First Silicon",
            "Buy your first production unit.",
            1_000.0,
            1.0,
            AchievementMetric::ProductionLines,
        ),
        achievement(
            "ach2",
            "Wafer Novice",
            "Earn $500.",
            5_000.0,
            500.0,
            AchievementMetric::TotalEarned,
        ),
        achievement(
            "ach3",
            "Chip Tycoon",
            "Earn $2,500.",
            25_000.0,
            2_500.0,
            AchievementMetric::TotalEarned,
        ),
        achievement(
            "ach4",
            "Quantum Baron",
            "Earn $10,000.",
            100_000.0,
            10_000.0,
            AchievementMetric::TotalEarned,
        ),
        achievement(
            "ach5",
            "AI Empire",
            "Earn $50,000.",
            500_000.0,
            50_000.0,
            AchievementMetric::TotalEarned,
        ),
        achievement(
            "ach6",
            "Money Maker",
            "Hold $1,000,000 at once.",
            1_000_000.0,
            1_000_000.0,
            AchievementMetric::Money,
        ),
        achievement(
            "ach7",
            "Upgrade Master",
            "Purchase 10 upgrade levels.",
            500_000.0,
            10.0,
            AchievementMetric::Upgrades,
        ),
        achievement(
            "ach8",
            "Prestige Player",
            "Prestige once.",
            1_000_000.0,
            1.0,
            AchievementMetric::Prestige,
        ),
    ]
}

/// Pool the random-event driver draws from.
pub fn event_pool() -> Vec<MarketEvent> {
    vec![
        MarketEvent {
            id: 1,
            title: "Tech Breakthrough!".to_string(),
            description: "Production efficiency increased by 20% for 60 seconds!".to_string(),
            effect: EventEffect::Production,
            duration_ms: 60_000,
            multiplier: 1.2,
        },
        MarketEvent {
            id: 2,
            title: "Market Boom!".to_string(),
            description: "All markets are performing at 150% for 45 seconds!".to_string(),
            effect: EventEffect::Market,
            duration_ms: 45_000,
            multiplier: 1.5,
        },
        MarketEvent {
            id: 3,
            title: "Investment Opportunity".to_string(),
            description: "Get 50% more money from sales for 30 seconds!".to_string(),
            effect: EventEffect::Income,
            duration_ms: 30_000,
            multiplier: 1.5,
        },
        MarketEvent {
            id: 4,
            title: "Supply Chain Issues".to_string(),
            description: "Production slowed by 30% for 90 seconds.".to_string(),
            effect: EventEffect::Cost,
            duration_ms: 90_000,
            multiplier: 0.7,
        },
    ]
}

/// Fresh game state with every catalog at its defaults. `last_save` and
/// `game_start_time` are zero until the caller stamps them.
pub fn initial_state(config: &EconomyConfig) -> GameState {
    GameState {
        money: config.starting_money,
        total_earned: 0.0,
        total_spent: 0.0,
        production_lines: initial_lines(),
        upgrades: initial_upgrades(),
        achievements: initial_achievements(),
        current_event: None,
        market_multiplier: 1.0,
        prestige_level: 0,
        prestige_tokens: 0,
        prestige_upgrades: initial_prestige_upgrades(),
        boost_active: false,
        settings: GameSettings::default(),
        last_save: 0,
        game_start_time: 0,
    }
}
