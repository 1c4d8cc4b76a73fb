//! Nested transactions over one flat transaction plus savepoints
//!
//! The backend has a single physical transaction. Nesting is emulated: the
//! outermost level opens the transaction, every deeper level sets a savepoint
//! named after the level it was created at (`SP<n>`).
//!
//! Two layers live here:
//!
//! - [`TxCommand`] maps a caller-supplied level to the command the backend
//!   must receive. These back the level-taking driver primitives
//!   (`Driver::begin`, `Driver::rollback`, `Driver::commit`).
//! - [`TransactionDepth`] owns the level itself, so a rollback or commit can
//!   only ever end the innermost open level and never touches work belonging
//!   to a shallower one. [`TransactionScope`] wraps it in an RAII guard.

use super::dialect::Dialect;
use super::driver::Driver;
use super::error::{DatabaseError, Result};

/// A single transaction-control command for the master connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxCommand {
    /// Open the flat transaction
    Begin,
    /// `SAVEPOINT SP<n>`
    Savepoint(u32),
    /// `ROLLBACK TO SAVEPOINT SP<n>`
    RollbackTo(u32),
    /// `RELEASE SAVEPOINT SP<n>`, a no-op where the dialect has no release
    Release(u32),
    /// Native full rollback
    Rollback,
    /// Native full commit
    Commit,
}

impl TxCommand {
    /// Command for beginning a transaction while `level` transactions are open
    pub fn for_begin(level: u32) -> Self {
        if level == 0 {
            TxCommand::Begin
        } else {
            TxCommand::Savepoint(level)
        }
    }

    /// Command for rolling back while `level` transactions are open.
    /// `None` when nothing is open.
    pub fn for_rollback(level: u32) -> Option<Self> {
        match level.checked_sub(1)? {
            0 => Some(TxCommand::Rollback),
            point => Some(TxCommand::RollbackTo(point)),
        }
    }

    /// SQL text to execute, or `None` for native calls and dialect no-ops
    pub fn sql(&self, dialect: &Dialect) -> Option<String> {
        match *self {
            TxCommand::Begin => Some(dialect.begin.to_string()),
            TxCommand::Savepoint(level) => Some(dialect.savepoint(level)),
            TxCommand::RollbackTo(level) => Some(dialect.rollback_to_savepoint(level)),
            TxCommand::Release(level) => dialect.release_savepoint(level),
            TxCommand::Rollback | TxCommand::Commit => None,
        }
    }
}

/// Nesting depth owned by the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionDepth {
    level: u32,
}

impl TransactionDepth {
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_open(&self) -> bool {
        self.level > 0
    }

    pub fn begin_command(&self) -> TxCommand {
        TxCommand::for_begin(self.level)
    }

    /// Only the outermost level commits; inner levels release their savepoint
    /// and leave the work to the enclosing transaction.
    pub fn commit_command(&self) -> Result<TxCommand> {
        match self.level {
            0 => Err(DatabaseError::transaction("commit without an open transaction")),
            1 => Ok(TxCommand::Commit),
            level => Ok(TxCommand::Release(level - 1)),
        }
    }

    pub fn rollback_command(&self) -> Result<TxCommand> {
        TxCommand::for_rollback(self.level)
            .ok_or_else(|| DatabaseError::transaction("rollback without an open transaction"))
    }

    pub(crate) fn push(&mut self) {
        self.level += 1;
    }

    pub(crate) fn pop(&mut self) {
        self.level = self.level.saturating_sub(1);
    }
}

/// Guard for one nesting level that rolls back on drop unless committed
///
/// # Example
///
/// ```ignore
/// let mut tx = TransactionScope::begin(&mut driver)?;
/// tx.execute("UPDATE xe_documents SET readed_count = readed_count + 1");
/// {
///     let mut inner = tx.nested()?;
///     inner.execute("DELETE FROM xe_documents WHERE module_srl = 0");
///     // dropped: rolls back to its savepoint only
/// }
/// tx.commit()?;
/// ```
pub struct TransactionScope<'d> {
    driver: &'d mut Driver,
    finished: bool,
}

impl<'d> TransactionScope<'d> {
    /// Open a new nesting level on `driver`
    ///
    /// # Errors
    ///
    /// Returns the captured backend error if the begin command failed
    pub fn begin(driver: &'d mut Driver) -> Result<Self> {
        if !driver.begin_transaction() {
            return Err(driver
                .last_error()
                .cloned()
                .map(DatabaseError::Backend)
                .unwrap_or_else(|| DatabaseError::transaction("begin failed")));
        }
        Ok(Self {
            driver,
            finished: false,
        })
    }

    /// Open a level nested inside this one
    pub fn nested(&mut self) -> Result<TransactionScope<'_>> {
        TransactionScope::begin(&mut *self.driver)
    }

    /// Run a statement on the master connection
    pub fn execute(&mut self, sql: &str) -> bool {
        self.driver.execute(sql)
    }

    pub fn driver(&mut self) -> &mut Driver {
        &mut *self.driver
    }

    pub fn level(&self) -> u32 {
        self.driver.transaction_level()
    }

    /// End this level, keeping its work. A commit the backend rejected
    /// leaves the level open, and dropping the scope then rolls it back.
    pub fn commit(mut self) -> Result<bool> {
        let result = self.driver.commit_transaction();
        self.finished = !matches!(result, Ok(false));
        result
    }

    /// End this level, discarding its work
    pub fn rollback(mut self) -> Result<bool> {
        self.finished = true;
        self.driver.rollback_transaction()
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::warn!(
            "transaction scope at level {} dropped without commit, rolling back",
            self.driver.transaction_level()
        );
        if let Err(e) = self.driver.rollback_transaction() {
            log::error!("implicit rollback failed: {}", e);
        }
    }
}
