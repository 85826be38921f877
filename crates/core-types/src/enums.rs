use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Long,
    Short,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Long => "LONG",
            TradeType::Short => "SHORT",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LONG" => Ok(TradeType::Long),
            "SHORT" => Ok(TradeType::Short),
            other => Err(CoreError::InvalidInput(
                "trade_type".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// The lifecycle state of a trade record.
///
/// Only `Closed` trades are fully realized; the analytics layer excludes
/// `Open` and `Partial` trades from P&L and streak statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
    Partial,
}

impl TradeStatus {
    /// Returns true if the trade is fully realized.
    pub fn is_closed(&self) -> bool {
        matches!(self, TradeStatus::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "OPEN",
            TradeStatus::Closed => "CLOSED",
            TradeStatus::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TradeStatus::Open),
            "CLOSED" => Ok(TradeStatus::Closed),
            "PARTIAL" => Ok(TradeStatus::Partial),
            other => Err(CoreError::InvalidInput(
                "trade_status".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// The kind of setup that produced a trade. Purely descriptive; the journal
/// surfaces it in listings and exports but no dashboard statistic depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupType {
    Breakout,
    Pullback,
    NewsBased,
    Technical,
    Fundamental,
    Scalping,
    Swing,
    Position,
    LiquiditySweep,
    OrderBlock,
    FairValueGap,
    BreakerBlock,
    MitigationBlock,
    MarketStructure,
    BosChoch,
    Reversal,
    Fibonacci,
    SupportResistance,
    Other,
}

impl SetupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupType::Breakout => "BREAKOUT",
            SetupType::Pullback => "PULLBACK",
            SetupType::NewsBased => "NEWS_BASED",
            SetupType::Technical => "TECHNICAL",
            SetupType::Fundamental => "FUNDAMENTAL",
            SetupType::Scalping => "SCALPING",
            SetupType::Swing => "SWING",
            SetupType::Position => "POSITION",
            SetupType::LiquiditySweep => "LIQUIDITY_SWEEP",
            SetupType::OrderBlock => "ORDER_BLOCK",
            SetupType::FairValueGap => "FAIR_VALUE_GAP",
            SetupType::BreakerBlock => "BREAKER_BLOCK",
            SetupType::MitigationBlock => "MITIGATION_BLOCK",
            SetupType::MarketStructure => "MARKET_STRUCTURE",
            SetupType::BosChoch => "BOS_CHOCH",
            SetupType::Reversal => "REVERSAL",
            SetupType::Fibonacci => "FIBONACCI",
            SetupType::SupportResistance => "SUPPORT_RESISTANCE",
            SetupType::Other => "OTHER",
        }
    }
}

impl fmt::Display for SetupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetupType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BREAKOUT" => Ok(SetupType::Breakout),
            "PULLBACK" => Ok(SetupType::Pullback),
            "NEWS_BASED" => Ok(SetupType::NewsBased),
            "TECHNICAL" => Ok(SetupType::Technical),
            "FUNDAMENTAL" => Ok(SetupType::Fundamental),
            "SCALPING" => Ok(SetupType::Scalping),
            "SWING" => Ok(SetupType::Swing),
            "POSITION" => Ok(SetupType::Position),
            "LIQUIDITY_SWEEP" => Ok(SetupType::LiquiditySweep),
            "ORDER_BLOCK" => Ok(SetupType::OrderBlock),
            "FAIR_VALUE_GAP" => Ok(SetupType::FairValueGap),
            "BREAKER_BLOCK" => Ok(SetupType::BreakerBlock),
            "MITIGATION_BLOCK" => Ok(SetupType::MitigationBlock),
            "MARKET_STRUCTURE" => Ok(SetupType::MarketStructure),
            "BOS_CHOCH" => Ok(SetupType::BosChoch),
            "REVERSAL" => Ok(SetupType::Reversal),
            "FIBONACCI" => Ok(SetupType::Fibonacci),
            "SUPPORT_RESISTANCE" => Ok(SetupType::SupportResistance),
            "OTHER" => Ok(SetupType::Other),
            other => Err(CoreError::InvalidInput(
                "setup_type".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// Emotional states tracked by the psychology journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Fear,
    Greed,
    Fomo,
    Confidence,
    Anxiety,
    Excitement,
    Frustration,
    Calm,
    Uncertainty,
    Hopeful,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Fear => "FEAR",
            Emotion::Greed => "GREED",
            Emotion::Fomo => "FOMO",
            Emotion::Confidence => "CONFIDENCE",
            Emotion::Anxiety => "ANXIETY",
            Emotion::Excitement => "EXCITEMENT",
            Emotion::Frustration => "FRUSTRATION",
            Emotion::Calm => "CALM",
            Emotion::Uncertainty => "UNCERTAINTY",
            Emotion::Hopeful => "HOPEFUL",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FEAR" => Ok(Emotion::Fear),
            "GREED" => Ok(Emotion::Greed),
            "FOMO" => Ok(Emotion::Fomo),
            "CONFIDENCE" => Ok(Emotion::Confidence),
            "ANXIETY" => Ok(Emotion::Anxiety),
            "EXCITEMENT" => Ok(Emotion::Excitement),
            "FRUSTRATION" => Ok(Emotion::Frustration),
            "CALM" => Ok(Emotion::Calm),
            "UNCERTAINTY" => Ok(Emotion::Uncertainty),
            "HOPEFUL" => Ok(Emotion::Hopeful),
            other => Err(CoreError::InvalidInput(
                "emotion".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// What a trading goal measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Profit,
    WinRate,
    TradeCount,
    RiskManagement,
    Learning,
    Habit,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Profit => "PROFIT",
            GoalType::WinRate => "WIN_RATE",
            GoalType::TradeCount => "TRADE_COUNT",
            GoalType::RiskManagement => "RISK_MANAGEMENT",
            GoalType::Learning => "LEARNING",
            GoalType::Habit => "HABIT",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROFIT" => Ok(GoalType::Profit),
            "WIN_RATE" => Ok(GoalType::WinRate),
            "TRADE_COUNT" => Ok(GoalType::TradeCount),
            "RISK_MANAGEMENT" => Ok(GoalType::RiskManagement),
            "LEARNING" => Ok(GoalType::Learning),
            "HABIT" => Ok(GoalType::Habit),
            other => Err(CoreError::InvalidInput(
                "goal_type".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// The horizon a goal is tracked over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl GoalPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPeriod::Daily => "DAILY",
            GoalPeriod::Weekly => "WEEKLY",
            GoalPeriod::Monthly => "MONTHLY",
            GoalPeriod::Quarterly => "QUARTERLY",
            GoalPeriod::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(GoalPeriod::Daily),
            "WEEKLY" => Ok(GoalPeriod::Weekly),
            "MONTHLY" => Ok(GoalPeriod::Monthly),
            "QUARTERLY" => Ok(GoalPeriod::Quarterly),
            "YEARLY" => Ok(GoalPeriod::Yearly),
            other => Err(CoreError::InvalidInput(
                "goal_period".to_string(),
                other.to_string(),
            )),
        }
    }
}
