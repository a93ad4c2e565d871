// ABOUTME: RAII transaction guard for multi-statement recipe writes
// ABOUTME: Rolls back automatically when dropped without an explicit commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with RAII guards
//!
//! Recipe creation and update touch three tables. The writes go through a
//! `TransactionGuard` so that an early `?` return leaves nothing behind:
//!
//! ```text
//! let mut guard = database.begin().await?;
//! sqlx::query("INSERT INTO recipes ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO recipe_ingredients ...").execute(guard.executor()?).await?;
//! guard.commit().await?;
//! ```

use sqlx::{Database, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// # Type Parameters
///
/// * `DB` - The database type (e.g., `Sqlite`)
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Create a new transaction guard from an existing `SQLx` transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction was already consumed or the
    /// database commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
        self.committed = true;
        debug!("TransactionGuard committed successfully");
        Ok(())
    }

    /// Explicitly rollback the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback operation fails
    pub async fn rollback(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot rollback"))?;

        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
        debug!("TransactionGuard rolled back explicitly");
        Ok(())
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Get the underlying connection for executing queries
    ///
    /// # Errors
    ///
    /// Returns an error if the guard is used after commit or rollback
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!("TransactionGuard dropped without commit - transaction will be rolled back");
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
