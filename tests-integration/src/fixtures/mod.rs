//! Test fixtures for integration testing
//!
//! Provides a PostgreSQL-backed context for exercising database resets
//! against a real store.

mod postgres_context;

pub use postgres_context::PostgresContext;
