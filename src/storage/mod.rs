//! Storage layer for league data
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures and the stat enumeration
//! - `schema`: Database connection and schema management
//! - `queries`: Upserts and the point-in-time read queries the pipeline uses

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::LeagueDatabase;
