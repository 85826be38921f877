use crate::enums::{Emotion, GoalPeriod, GoalType, SetupType, TradeStatus, TradeType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single journaled trade, as stored in and returned by the trade store.
///
/// `date`, `symbol`, `trade_type` and `trade_status` are always present;
/// everything else is descriptive and optional. A missing `profit_loss`
/// is treated as zero by every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The day the trade was taken.
    pub date: NaiveDate,
    /// Stock, forex pair, or asset name.
    pub symbol: String,
    pub trade_type: TradeType,
    pub trade_status: TradeStatus,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    /// Number of shares or lot size.
    pub quantity: i32,
    pub stop_loss: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub exit_reason: Option<String>,
    /// Actual profit or loss amount, signed.
    pub profit_loss: Option<Decimal>,
    pub percentage_gain_loss: Option<Decimal>,
    pub setup_type: Option<SetupType>,
    /// Confidence rating (1-10).
    pub confidence_level: Option<i32>,
    pub emotion_notes: Option<String>,
    pub learning_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TradeRecord {
    /// The realized P&L of this trade, with a missing value counting as zero.
    pub fn realized_pnl(&self) -> Decimal {
        self.profit_loss.unwrap_or(Decimal::ZERO)
    }

    /// Whether the trade closed with a strictly positive P&L.
    pub fn is_profitable(&self) -> bool {
        self.realized_pnl() > Decimal::ZERO
    }

    /// The planned risk-reward ratio, rounded to 2 decimal places.
    ///
    /// Requires a stop loss and a target price; returns `None` when either is
    /// missing or the implied risk is zero.
    pub fn risk_reward_ratio(&self) -> Option<Decimal> {
        let stop_loss = self.stop_loss?;
        let target_price = self.target_price?;

        let (risk, reward) = match self.trade_type {
            TradeType::Long => (
                (self.entry_price - stop_loss).abs(),
                (target_price - self.entry_price).abs(),
            ),
            TradeType::Short => (
                (stop_loss - self.entry_price).abs(),
                (self.entry_price - target_price).abs(),
            ),
        };

        if risk > Decimal::ZERO {
            Some((reward / risk).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        } else {
            None
        }
    }
}

/// The user-settable portion of a trade, used for creates and updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub date: NaiveDate,
    pub symbol: String,
    pub trade_type: TradeType,
    #[serde(default = "default_trade_status")]
    pub trade_status: TradeStatus,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: i32,
    pub stop_loss: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub exit_reason: Option<String>,
    pub profit_loss: Option<Decimal>,
    pub percentage_gain_loss: Option<Decimal>,
    pub setup_type: Option<SetupType>,
    pub confidence_level: Option<i32>,
    pub emotion_notes: Option<String>,
    pub learning_notes: Option<String>,
}

// New trades default to CLOSED, matching the store's column default.
fn default_trade_status() -> TradeStatus {
    TradeStatus::Closed
}

/// Optional filters applied when listing trades.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub symbol: Option<String>,
    pub trade_type: Option<TradeType>,
    pub trade_status: Option<TradeStatus>,
}

/// A daily psychology journal entry. One per user per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologyEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub pre_trade_emotion: Emotion,
    pub pre_trade_confidence: i32,
    pub pre_trade_stress_level: i32,
    pub during_trade_emotion: Option<Emotion>,
    pub during_trade_confidence: Option<i32>,
    pub post_trade_emotion: Emotion,
    pub post_trade_confidence: i32,
    pub post_trade_satisfaction: i32,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub focus_level: i32,
    pub mental_notes: Option<String>,
    pub improvement_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The user-settable portion of a psychology entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPsychologyEntry {
    pub date: NaiveDate,
    pub pre_trade_emotion: Emotion,
    pub pre_trade_confidence: i32,
    pub pre_trade_stress_level: i32,
    pub during_trade_emotion: Option<Emotion>,
    pub during_trade_confidence: Option<i32>,
    pub post_trade_emotion: Emotion,
    pub post_trade_confidence: i32,
    pub post_trade_satisfaction: i32,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub focus_level: i32,
    pub mental_notes: Option<String>,
    pub improvement_notes: Option<String>,
}

/// A trading goal with a numeric target and a tracking window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: GoalType,
    pub period: GoalPeriod,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Decimal,
    pub current_value: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_achieved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TradingGoal {
    /// Progress toward the target as a percentage, capped at 100.
    pub fn progress_pct(&self) -> Decimal {
        if self.target_value > Decimal::ZERO {
            let pct = (self.current_value / self.target_value) * Decimal::ONE_HUNDRED;
            pct.min(Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        }
    }

    /// Whether the goal's window has passed without it being achieved.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.end_date && !self.is_achieved
    }
}

/// The user-settable portion of a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub goal_type: GoalType,
    pub period: GoalPeriod,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Decimal,
    #[serde(default)]
    pub current_value: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(trade_type: TradeType) -> TradeRecord {
        TradeRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            symbol: "AAPL".to_string(),
            trade_type,
            trade_status: TradeStatus::Closed,
            entry_price: dec!(100),
            exit_price: Some(dec!(110)),
            quantity: 10,
            stop_loss: Some(dec!(95)),
            target_price: Some(dec!(115)),
            exit_reason: None,
            profit_loss: Some(dec!(100)),
            percentage_gain_loss: None,
            setup_type: Some(SetupType::Breakout),
            confidence_level: Some(7),
            emotion_notes: None,
            learning_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn risk_reward_long() {
        // risk = 100 - 95 = 5, reward = 115 - 100 = 15
        let t = trade(TradeType::Long);
        assert_eq!(t.risk_reward_ratio(), Some(dec!(3.00)));
    }

    #[test]
    fn risk_reward_short() {
        let mut t = trade(TradeType::Short);
        t.stop_loss = Some(dec!(104));
        t.target_price = Some(dec!(90));
        // risk = 104 - 100 = 4, reward = 100 - 90 = 10
        assert_eq!(t.risk_reward_ratio(), Some(dec!(2.50)));
    }

    #[test]
    fn risk_reward_requires_stop_and_target() {
        let mut t = trade(TradeType::Long);
        t.stop_loss = None;
        assert_eq!(t.risk_reward_ratio(), None);

        let mut t = trade(TradeType::Long);
        t.stop_loss = Some(t.entry_price); // zero risk
        assert_eq!(t.risk_reward_ratio(), None);
    }

    #[test]
    fn missing_pnl_counts_as_zero() {
        let mut t = trade(TradeType::Long);
        t.profit_loss = None;
        assert_eq!(t.realized_pnl(), Decimal::ZERO);
        assert!(!t.is_profitable());
    }

    #[test]
    fn goal_progress_is_capped() {
        let goal = TradingGoal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_type: GoalType::Profit,
            period: GoalPeriod::Monthly,
            title: "Monthly profit".to_string(),
            description: None,
            target_value: dec!(1000),
            current_value: dec!(1500),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            is_achieved: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(goal.progress_pct(), dec!(100));
        assert!(goal.is_overdue(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!goal.is_overdue(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
    }
}
