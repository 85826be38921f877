use crate::error::DbError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{
    NewGoal, NewPsychologyEntry, NewTrade, PsychologyEntry, TradeFilters, TradeRecord,
    TradingGoal,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic,
/// and every query is scoped to a single user.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A raw row from the `trades` table. Enum columns are stored as their
/// uppercase string values and parsed on the way out.
#[derive(Debug, Clone, FromRow)]
pub struct DbTrade {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub symbol: String,
    pub trade_type: String,
    pub trade_status: String,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: i32,
    pub stop_loss: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub exit_reason: Option<String>,
    pub profit_loss: Option<Decimal>,
    pub percentage_gain_loss: Option<Decimal>,
    pub setup_type: Option<String>,
    pub confidence_level: Option<i32>,
    pub emotion_notes: Option<String>,
    pub learning_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbTrade> for TradeRecord {
    type Error = DbError;

    fn try_from(row: DbTrade) -> Result<Self, Self::Error> {
        Ok(TradeRecord {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            symbol: row.symbol,
            trade_type: row.trade_type.parse()?,
            trade_status: row.trade_status.parse()?,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            quantity: row.quantity,
            stop_loss: row.stop_loss,
            target_price: row.target_price,
            exit_reason: row.exit_reason,
            profit_loss: row.profit_loss,
            percentage_gain_loss: row.percentage_gain_loss,
            setup_type: row.setup_type.as_deref().map(str::parse).transpose()?,
            confidence_level: row.confidence_level,
            emotion_notes: row.emotion_notes,
            learning_notes: row.learning_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A raw row from the `trading_psychology` table.
#[derive(Debug, Clone, FromRow)]
pub struct DbPsychologyEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub pre_trade_emotion: String,
    pub pre_trade_confidence: i32,
    pub pre_trade_stress_level: i32,
    pub during_trade_emotion: Option<String>,
    pub during_trade_confidence: Option<i32>,
    pub post_trade_emotion: String,
    pub post_trade_confidence: i32,
    pub post_trade_satisfaction: i32,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub focus_level: i32,
    pub mental_notes: Option<String>,
    pub improvement_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbPsychologyEntry> for PsychologyEntry {
    type Error = DbError;

    fn try_from(row: DbPsychologyEntry) -> Result<Self, Self::Error> {
        Ok(PsychologyEntry {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            pre_trade_emotion: row.pre_trade_emotion.parse()?,
            pre_trade_confidence: row.pre_trade_confidence,
            pre_trade_stress_level: row.pre_trade_stress_level,
            during_trade_emotion: row.during_trade_emotion.as_deref().map(str::parse).transpose()?,
            during_trade_confidence: row.during_trade_confidence,
            post_trade_emotion: row.post_trade_emotion.parse()?,
            post_trade_confidence: row.post_trade_confidence,
            post_trade_satisfaction: row.post_trade_satisfaction,
            sleep_quality: row.sleep_quality,
            stress_level: row.stress_level,
            focus_level: row.focus_level,
            mental_notes: row.mental_notes,
            improvement_notes: row.improvement_notes,
            created_at: row.created_at,
        })
    }
}

/// A raw row from the `trading_goals` table.
#[derive(Debug, Clone, FromRow)]
pub struct DbGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub period: String,
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

impl TryFrom<DbGoal> for TradingGoal {
    type Error = DbError;

    fn try_from(row: DbGoal) -> Result<Self, Self::Error> {
        Ok(TradingGoal {
            id: row.id,
            user_id: row.user_id,
            goal_type: row.goal_type.parse()?,
            period: row.period.parse()?,
            title: row.title,
            description: row.description,
            target_value: row.target_value,
            current_value: row.current_value,
            start_date: row.start_date,
            end_date: row.end_date,
            is_achieved: row.is_achieved,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const TRADE_COLUMNS: &str = "id, user_id, date, symbol, trade_type, trade_status, entry_price, \
     exit_price, quantity, stop_loss, target_price, exit_reason, profit_loss, \
     percentage_gain_loss, setup_type, confidence_level, emotion_notes, learning_notes, \
     created_at, updated_at";

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a user's trades, newest first.
    ///
    /// Rows are always ordered `date DESC, created_at DESC`; the analytics
    /// engine's streak and recent-trades logic depends on this ordering.
    pub async fn get_trades(
        &self,
        user_id: Uuid,
        filters: &TradeFilters,
    ) -> Result<Vec<TradeRecord>, DbError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {TRADE_COLUMNS} FROM trades WHERE user_id = "
        ));
        query.push_bind(user_id);

        if let Some(date_from) = filters.date_from {
            query.push(" AND date >= ");
            query.push_bind(date_from);
        }
        if let Some(date_to) = filters.date_to {
            query.push(" AND date <= ");
            query.push_bind(date_to);
        }
        if let Some(symbol) = &filters.symbol {
            query.push(" AND symbol = ");
            query.push_bind(symbol.as_str());
        }
        if let Some(trade_type) = filters.trade_type {
            query.push(" AND trade_type = ");
            query.push_bind(trade_type.as_str());
        }
        if let Some(trade_status) = filters.trade_status {
            query.push(" AND trade_status = ");
            query.push_bind(trade_status.as_str());
        }

        query.push(" ORDER BY date DESC, created_at DESC");

        let rows: Vec<DbTrade> = query.build_query_as().fetch_all(&self.pool).await?;
        tracing::debug!(user_id = %user_id, rows = rows.len(), "Fetched trades.");

        rows.into_iter().map(TradeRecord::try_from).collect()
    }

    /// Fetches one trade by id, scoped to its owner.
    pub async fn get_trade(&self, user_id: Uuid, trade_id: Uuid) -> Result<TradeRecord, DbError> {
        let row = sqlx::query_as::<_, DbTrade>(&format!(
            "SELECT {TRADE_COLUMNS} FROM trades WHERE id = $1 AND user_id = $2"
        ))
        .bind(trade_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        TradeRecord::try_from(row)
    }

    /// Inserts a new trade for the user and returns the stored record.
    pub async fn save_trade(
        &self,
        user_id: Uuid,
        trade: &NewTrade,
    ) -> Result<TradeRecord, DbError> {
        let row = sqlx::query_as::<_, DbTrade>(&format!(
            r#"
            INSERT INTO trades (
                id, user_id, date, symbol, trade_type, trade_status, entry_price,
                exit_price, quantity, stop_loss, target_price, exit_reason,
                profit_loss, percentage_gain_loss, setup_type, confidence_level,
                emotion_notes, learning_notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {TRADE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(trade.date)
        .bind(trade.symbol.as_str())
        .bind(trade.trade_type.as_str())
        .bind(trade.trade_status.as_str())
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.quantity)
        .bind(trade.stop_loss)
        .bind(trade.target_price)
        .bind(trade.exit_reason.as_deref())
        .bind(trade.profit_loss)
        .bind(trade.percentage_gain_loss)
        .bind(trade.setup_type.map(|s| s.as_str()))
        .bind(trade.confidence_level)
        .bind(trade.emotion_notes.as_deref())
        .bind(trade.learning_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        TradeRecord::try_from(row)
    }

    /// Replaces the user-settable fields of an existing trade.
    pub async fn update_trade(
        &self,
        user_id: Uuid,
        trade_id: Uuid,
        trade: &NewTrade,
    ) -> Result<TradeRecord, DbError> {
        let row = sqlx::query_as::<_, DbTrade>(&format!(
            r#"
            UPDATE trades SET
                date = $1, symbol = $2, trade_type = $3, trade_status = $4,
                entry_price = $5, exit_price = $6, quantity = $7, stop_loss = $8,
                target_price = $9, exit_reason = $10, profit_loss = $11,
                percentage_gain_loss = $12, setup_type = $13, confidence_level = $14,
                emotion_notes = $15, learning_notes = $16, updated_at = NOW()
            WHERE id = $17 AND user_id = $18
            RETURNING {TRADE_COLUMNS}
            "#
        ))
        .bind(trade.date)
        .bind(trade.symbol.as_str())
        .bind(trade.trade_type.as_str())
        .bind(trade.trade_status.as_str())
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.quantity)
        .bind(trade.stop_loss)
        .bind(trade.target_price)
        .bind(trade.exit_reason.as_deref())
        .bind(trade.profit_loss)
        .bind(trade.percentage_gain_loss)
        .bind(trade.setup_type.map(|s| s.as_str()))
        .bind(trade.confidence_level)
        .bind(trade.emotion_notes.as_deref())
        .bind(trade.learning_notes.as_deref())
        .bind(trade_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        TradeRecord::try_from(row)
    }

    /// Deletes a trade owned by the user.
    pub async fn delete_trade(&self, user_id: Uuid, trade_id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM trades WHERE id = $1 AND user_id = $2")
            .bind(trade_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Fetches a user's psychology journal, newest first.
    pub async fn get_psychology_entries(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PsychologyEntry>, DbError> {
        let rows = sqlx::query_as::<_, DbPsychologyEntry>(
            r#"
            SELECT id, user_id, date, pre_trade_emotion, pre_trade_confidence,
                   pre_trade_stress_level, during_trade_emotion, during_trade_confidence,
                   post_trade_emotion, post_trade_confidence, post_trade_satisfaction,
                   sleep_quality, stress_level, focus_level, mental_notes,
                   improvement_notes, created_at
            FROM trading_psychology
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PsychologyEntry::try_from).collect()
    }

    /// Inserts a psychology entry. The table allows one entry per user per
    /// day; a second insert for the same date fails.
    pub async fn save_psychology_entry(
        &self,
        user_id: Uuid,
        entry: &NewPsychologyEntry,
    ) -> Result<PsychologyEntry, DbError> {
        let row = sqlx::query_as::<_, DbPsychologyEntry>(
            r#"
            INSERT INTO trading_psychology (
                id, user_id, date, pre_trade_emotion, pre_trade_confidence,
                pre_trade_stress_level, during_trade_emotion, during_trade_confidence,
                post_trade_emotion, post_trade_confidence, post_trade_satisfaction,
                sleep_quality, stress_level, focus_level, mental_notes, improvement_notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, user_id, date, pre_trade_emotion, pre_trade_confidence,
                      pre_trade_stress_level, during_trade_emotion, during_trade_confidence,
                      post_trade_emotion, post_trade_confidence, post_trade_satisfaction,
                      sleep_quality, stress_level, focus_level, mental_notes,
                      improvement_notes, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(entry.date)
        .bind(entry.pre_trade_emotion.as_str())
        .bind(entry.pre_trade_confidence)
        .bind(entry.pre_trade_stress_level)
        .bind(entry.during_trade_emotion.map(|e| e.as_str()))
        .bind(entry.during_trade_confidence)
        .bind(entry.post_trade_emotion.as_str())
        .bind(entry.post_trade_confidence)
        .bind(entry.post_trade_satisfaction)
        .bind(entry.sleep_quality)
        .bind(entry.stress_level)
        .bind(entry.focus_level)
        .bind(entry.mental_notes.as_deref())
        .bind(entry.improvement_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        PsychologyEntry::try_from(row)
    }

    /// Fetches a user's goals, most recently created first.
    pub async fn get_goals(&self, user_id: Uuid) -> Result<Vec<TradingGoal>, DbError> {
        let rows = sqlx::query_as::<_, DbGoal>(
            r#"
            SELECT id, user_id, goal_type, period, title, description, target_value,
                   current_value, start_date, end_date, is_achieved, is_active,
                   created_at, updated_at
            FROM trading_goals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TradingGoal::try_from).collect()
    }

    /// Inserts a new goal for the user and returns the stored record.
    pub async fn save_goal(&self, user_id: Uuid, goal: &NewGoal) -> Result<TradingGoal, DbError> {
        let row = sqlx::query_as::<_, DbGoal>(
            r#"
            INSERT INTO trading_goals (
                id, user_id, goal_type, period, title, description, target_value,
                current_value, start_date, end_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, goal_type, period, title, description, target_value,
                      current_value, start_date, end_date, is_achieved, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(goal.goal_type.as_str())
        .bind(goal.period.as_str())
        .bind(goal.title.as_str())
        .bind(goal.description.as_deref())
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(goal.start_date)
        .bind(goal.end_date)
        .fetch_one(&self.pool)
        .await?;

        TradingGoal::try_from(row)
    }

    /// Replaces the user-settable fields of an existing goal.
    pub async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        goal: &NewGoal,
    ) -> Result<TradingGoal, DbError> {
        let row = sqlx::query_as::<_, DbGoal>(
            r#"
            UPDATE trading_goals SET
                goal_type = $1, period = $2, title = $3, description = $4,
                target_value = $5, current_value = $6, start_date = $7, end_date = $8,
                is_achieved = ($6 >= $5), updated_at = NOW()
            WHERE id = $9 AND user_id = $10
            RETURNING id, user_id, goal_type, period, title, description, target_value,
                      current_value, start_date, end_date, is_achieved, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(goal.goal_type.as_str())
        .bind(goal.period.as_str())
        .bind(goal.title.as_str())
        .bind(goal.description.as_deref())
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(goal.start_date)
        .bind(goal.end_date)
        .bind(goal_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;

        TradingGoal::try_from(row)
    }
}
