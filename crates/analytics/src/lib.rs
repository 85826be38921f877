//! # Tradelog Analytics Engine
//!
//! This crate derives the dashboard statistics from a user's journaled
//! trades. It is the computational heart of the journal.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatsEngine` takes a snapshot of trade
//!   records plus a reference date and produces a `DashboardStats`. It never
//!   touches the clock, performs no I/O, and cannot fail — an empty history
//!   simply yields a zeroed report. This makes it trivially safe to call
//!   from concurrent request handlers and easy to test.
//!
//! ## Public API
//!
//! - `StatsEngine`: the struct that contains the calculation logic.
//! - `DashboardStats`: the flat statistics object the dashboard renders.
//! - `SymbolPerformance`, `FavoriteSymbol`, `MonthlyPerformance`: the list
//!   entry types nested in `DashboardStats`.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatsEngine;
pub use stats::{DashboardStats, FavoriteSymbol, MonthlyPerformance, SymbolPerformance};
