use crate::auth::CurrentUser;
use crate::{error::AppError, AppState};
use analytics::{DashboardStats, StatsEngine};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use core_types::{
    NewGoal, NewPsychologyEntry, NewTrade, PsychologyEntry, TradeFilters, TradeRecord,
    TradingGoal,
};
use std::sync::Arc;
use uuid::Uuid;

/// # GET /api/dashboard-stats
///
/// Fetches the user's full trade history (newest first, as the store
/// guarantees) and derives the dashboard statistics from it. The reference
/// date is read from the clock exactly once, here at the boundary; the
/// engine itself is a pure function.
pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<DashboardStats>, AppError> {
    let trades = state
        .db_repo
        .get_trades(user_id, &TradeFilters::default())
        .await?;

    let stats = StatsEngine::new().calculate(&trades, Utc::now().date_naive());
    Ok(Json(stats))
}

/// # GET /api/trades
///
/// Lists the user's trades, newest first, with optional query filters
/// (date_from, date_to, symbol, trade_type, trade_status).
pub async fn list_trades(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Query(filters): Query<TradeFilters>,
) -> Result<Json<Vec<TradeRecord>>, AppError> {
    let trades = state.db_repo.get_trades(user_id, &filters).await?;
    Ok(Json(trades))
}

/// # POST /api/trades
pub async fn create_trade(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(trade): Json<NewTrade>,
) -> Result<(StatusCode, Json<TradeRecord>), AppError> {
    let created = state.db_repo.save_trade(user_id, &trade).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # GET /api/trades/:trade_id
pub async fn get_trade(
    Path(trade_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<TradeRecord>, AppError> {
    let trade = state.db_repo.get_trade(user_id, trade_id).await?;
    Ok(Json(trade))
}

/// # PUT /api/trades/:trade_id
pub async fn update_trade(
    Path(trade_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(trade): Json<NewTrade>,
) -> Result<Json<TradeRecord>, AppError> {
    let updated = state.db_repo.update_trade(user_id, trade_id, &trade).await?;
    Ok(Json(updated))
}

/// # DELETE /api/trades/:trade_id
pub async fn delete_trade(
    Path(trade_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.db_repo.delete_trade(user_id, trade_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/trades/export
///
/// Downloads the user's trades (after the same optional filters as the
/// listing endpoint) as a CSV attachment.
pub async fn export_trades(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Query(filters): Query<TradeFilters>,
) -> Result<impl IntoResponse, AppError> {
    let trades = state.db_repo.get_trades(user_id, &filters).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for trade in &trades {
        writer
            .serialize(trade)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;

    let filename = format!("trading_journal_{}.csv", Utc::now().format("%Y%m%d"));
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, body))
}

/// # GET /api/psychology
pub async fn list_psychology_entries(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<PsychologyEntry>>, AppError> {
    let entries = state.db_repo.get_psychology_entries(user_id).await?;
    Ok(Json(entries))
}

/// # POST /api/psychology
pub async fn create_psychology_entry(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(entry): Json<NewPsychologyEntry>,
) -> Result<(StatusCode, Json<PsychologyEntry>), AppError> {
    let created = state.db_repo.save_psychology_entry(user_id, &entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # GET /api/goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<TradingGoal>>, AppError> {
    let goals = state.db_repo.get_goals(user_id).await?;
    Ok(Json(goals))
}

/// # POST /api/goals
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(goal): Json<NewGoal>,
) -> Result<(StatusCode, Json<TradingGoal>), AppError> {
    let created = state.db_repo.save_goal(user_id, &goal).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # PUT /api/goals/:goal_id
pub async fn update_goal(
    Path(goal_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Json(goal): Json<NewGoal>,
) -> Result<Json<TradingGoal>, AppError> {
    let updated = state.db_repo.update_goal(user_id, goal_id, &goal).await?;
    Ok(Json(updated))
}
