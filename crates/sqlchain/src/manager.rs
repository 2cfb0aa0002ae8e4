//! The fluent SELECT builder.

use crate::compile::{self, CompiledQuery};
use crate::config::ManagerConfig;
use crate::error::{QmError, QmResult};
use crate::helper::IsNotEmpty;
use crate::store::{
    ClauseStore, Direction, GroupClause, JoinClause, JoinType, LogicalOp, OrderClause, WhereClause,
    WhereOp,
};

/// Accumulates SELECT clauses for one table and compiles them.
///
/// Every mutating method takes `&mut self`, so a builder has exactly one
/// writer at a time. Share it across tasks only behind your own lock.
///
/// # Example
///
/// ```ignore
/// use sqlchain::{QueryManager, WhereOp};
///
/// let mut qm = QueryManager::new("users", executor);
/// qm.select("id, name")
///     .where_("name", WhereOp::Eq, "oke")
///     .and_where("age", WhereOp::Gte, "20")?
///     .order_by("name");
///
/// let stmt = qm.compile()?;
/// assert_eq!(stmt.sql(), "SELECT id, name FROM users WHERE name = ? AND age >= ? ORDER BY name ASC");
/// ```
#[derive(Debug, Clone)]
pub struct QueryManager<E> {
    table: String,
    store: ClauseStore,
    executor: E,
    config: ManagerConfig,
}

impl<E> QueryManager<E> {
    /// Create a builder for `table` with the default config.
    pub fn new(table: impl Into<String>, executor: E) -> Self {
        Self::with_config(table, executor, ManagerConfig::default())
    }

    pub fn with_config(table: impl Into<String>, executor: E, config: ManagerConfig) -> Self {
        Self {
            table: table.into(),
            store: ClauseStore::new(),
            executor,
            config,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Read-only view of the accumulated clauses.
    pub fn clauses(&self) -> &ClauseStore {
        &self.store
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    // ==================== SELECT ====================

    /// Append comma-separated SELECT fragments.
    ///
    /// Parts are trimmed and empty parts dropped, so `"a, ,b"` adds `a` and `b`.
    /// Repeated calls accumulate.
    pub fn select(&mut self, fields: &str) -> &mut Self {
        for part in fields.split(',') {
            let part = part.trim();
            if part.is_not_empty() {
                self.store.selects.push(part.to_string());
            }
        }
        self
    }

    /// Append `*`.
    pub fn select_all(&mut self) -> &mut Self {
        self.select("*")
    }

    // ==================== WHERE ====================

    fn push_where(&mut self, field: &str, op: WhereOp, logical: LogicalOp, value: String) {
        self.store.wheres.push(WhereClause {
            field: field.to_string(),
            operator: op,
            logical,
            value,
        });
    }

    fn require_where(&self, method: &str) -> QmResult<()> {
        if self.store.wheres.is_empty() {
            return Err(QmError::invalid_usage(format!(
                "Please call QueryManager::where_() first before calling {method}()"
            )));
        }
        Ok(())
    }

    /// Start (or extend with AND) the WHERE chain.
    pub fn where_(&mut self, field: &str, op: WhereOp, value: impl Into<String>) -> &mut Self {
        self.push_where(field, op, LogicalOp::And, value.into());
        self
    }

    /// `where_` with `=`.
    pub fn where_eq(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.where_(field, WhereOp::Eq, value)
    }

    /// Add an AND predicate. Fails if no WHERE clause exists yet.
    pub fn and_where(
        &mut self,
        field: &str,
        op: WhereOp,
        value: impl Into<String>,
    ) -> QmResult<&mut Self> {
        self.require_where("and_where")?;
        self.push_where(field, op, LogicalOp::And, value.into());
        Ok(self)
    }

    /// Add an OR predicate. Fails if no WHERE clause exists yet.
    pub fn or_where(
        &mut self,
        field: &str,
        op: WhereOp,
        value: impl Into<String>,
    ) -> QmResult<&mut Self> {
        self.require_where("or_where")?;
        self.push_where(field, op, LogicalOp::Or, value.into());
        Ok(self)
    }

    // ==================== JOIN ====================

    pub fn join(&mut self, table: &str, condition: &str, kind: JoinType) -> &mut Self {
        self.store.joins.push(JoinClause {
            table: table.to_string(),
            condition: condition.to_string(),
            kind,
        });
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.join(table, condition, JoinType::Inner)
    }

    /// Record an OUTER JOIN.
    ///
    /// There is no rendering rule for outer joins yet; [`compile`](Self::compile)
    /// rejects them with [`QmError::UnsupportedJoin`].
    pub fn outer_join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.join(table, condition, JoinType::Outer)
    }

    // ==================== ORDER / GROUP ====================

    pub fn order_by_with(&mut self, field: &str, direction: Direction) -> &mut Self {
        self.store.orders.push(OrderClause {
            field: field.to_string(),
            direction,
        });
        self
    }

    /// Add an ascending ORDER BY entry.
    pub fn order_by(&mut self, field: &str) -> &mut Self {
        self.order_by_with(field, Direction::Asc)
    }

    /// Add a descending ORDER BY entry.
    pub fn order_by_desc(&mut self, field: &str) -> &mut Self {
        self.order_by_with(field, Direction::Desc)
    }

    pub fn group_by(&mut self, field: &str) -> &mut Self {
        self.store.groups.push(GroupClause {
            field: field.to_string(),
        });
        self
    }

    // ==================== Compile / reset ====================

    /// Render the current clauses. Does not modify the builder.
    pub fn compile(&self) -> QmResult<CompiledQuery> {
        compile::compile(&self.table, &self.store)
    }

    /// Clear every clause and bound value.
    pub fn reset(&mut self) -> &mut Self {
        self.store.clear();
        self
    }

    /// Compile, then reset if `reset` is set. Used by the execute paths.
    pub(crate) fn take_statement(&mut self, reset: bool) -> QmResult<CompiledQuery> {
        let stmt = self.compile()?;
        crate::log::log_dispatch(&self.config, &self.table, &stmt, reset);
        if reset {
            self.store.clear();
        }
        Ok(stmt)
    }
}
