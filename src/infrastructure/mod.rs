//! Infrastructure Layer
//!
//! PostgreSQL implementations of the domain contracts:
//! - Connection pool, migrations and transaction management
//! - Repository implementations

pub mod database;
pub mod repositories;
