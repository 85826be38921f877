//! # Tradelog Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database. It is the journal's trade store.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate is an adapter that encapsulates all
//!   database-specific logic. It provides a clean, abstract API to the rest
//!   of the application, hiding the underlying SQL and row representations.
//! - **User Scoping:** Every query takes the authenticated user's id and
//!   touches only that user's rows; ownership checks live in the SQL itself.
//! - **Ordering Contract:** `get_trades` always returns rows newest first
//!   (`date DESC, created_at DESC`), which is the ordering the analytics
//!   engine's streak and recent-trades logic relies on.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses
//!   a connection pool (`PgPool`) for concurrent access.
//!
//! ## Public API
//!
//! - `connect`: the async function to establish the database connection pool.
//! - `run_migrations`: a utility to apply database migrations at startup.
//! - `DbRepository`: the main struct that holds the connection pool and
//!   provides all the high-level data access methods.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
