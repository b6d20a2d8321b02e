//! Unit of Work Pattern Implementation
//!
//! Transactional boundaries for operations that perform more than one
//! dependent write: all writes of one domain-service operation go through
//! the same transaction and either all persist or none do.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Begins transactions for the domain services.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a new transaction.
    async fn begin(&self) -> Result<TransactionContext, AppError>;
}

/// An open transaction, returned by [`UnitOfWork::begin`].
///
/// Consumed by `commit` or `rollback`, so a transaction cannot outlive the
/// service call that opened it. Dropping a context that was neither
/// committed nor rolled back rolls the transaction back when the connection
/// returns to the pool; an early `?` cannot leak an open transaction.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Create a new transaction context.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Connection handle for executing writes inside this transaction.
    pub fn as_mut(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit the transaction.
    ///
    /// A commit failure means the writes were issued but durability is
    /// unconfirmed; there is nothing left to roll back at that point.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }

    /// Roll back explicitly instead of waiting for the drop path.
    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}

/// PostgreSQL Unit of Work backed by the connection pool.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create a new Unit of Work instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn begin(&self) -> Result<TransactionContext, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(TransactionContext::new(tx))
    }
}
