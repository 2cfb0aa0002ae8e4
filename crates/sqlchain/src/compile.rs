//! Rendering of a [`ClauseStore`] into SQL text plus bind values.
//!
//! Clause order is fixed: SELECT, FROM, JOIN, WHERE, GROUP BY, ORDER BY.
//! Every WHERE value becomes one `?` bind marker; the compiler records where
//! it put each marker so the statement can later be re-targeted to numbered
//! (`$1`) markers or inlined literals without touching `?` characters that
//! happen to live inside caller-supplied fragments.

use crate::error::{QmError, QmResult};
use crate::helper::{IsNotEmpty, prepare_escaped_value, prepare_value};
use crate::store::{ClauseStore, JoinType};
use serde::Serialize;

/// A compiled SELECT statement.
///
/// Serializes as `{ "query": "...", "params": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    #[serde(rename = "query")]
    sql: String,
    params: Vec<String>,
    /// Byte offset of each `?` emitted by the compiler, parallel to `params`.
    #[serde(skip)]
    marks: Vec<usize>,
}

impl CompiledQuery {
    /// SQL text with `?` bind markers.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in marker order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.sql, self.params)
    }

    /// SQL text with `$1, $2, ...` markers.
    pub fn to_numbered_sql(&self) -> String {
        self.rewrite_marks(|idx, _| format!("${}", idx + 1))
    }

    /// SQL text with every bind value inlined as a quoted literal.
    pub fn to_inline_sql(&self) -> String {
        self.rewrite_marks(|_, value| prepare_value(value))
    }

    /// SQL text with every bind value inlined as a Postgres `E'...'` literal.
    ///
    /// Safe regardless of the server's `standard_conforming_strings` setting.
    pub fn to_escaped_sql(&self) -> String {
        self.rewrite_marks(|_, value| prepare_escaped_value(value))
    }

    fn rewrite_marks(&self, mut render: impl FnMut(usize, &str) -> String) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.params.len() * 8);
        let mut last = 0;
        for (idx, (&mark, value)) in self.marks.iter().zip(&self.params).enumerate() {
            out.push_str(&self.sql[last..mark]);
            out.push_str(&render(idx, value));
            last = mark + 1;
        }
        out.push_str(&self.sql[last..]);
        out
    }
}

/// Compile `store` against `table`.
pub(crate) fn compile(table: &str, store: &ClauseStore) -> QmResult<CompiledQuery> {
    let mut sql = String::from("SELECT ");
    if store.selects.is_not_empty() {
        sql.push_str(&store.selects.join(", "));
    } else {
        sql.push('*');
    }

    sql.push_str(" FROM ");
    sql.push_str(table);

    for join in &store.joins {
        match join.kind {
            JoinType::Inner => {
                sql.push_str(" INNER JOIN ");
                sql.push_str(&join.table);
                sql.push_str(" ON ");
                sql.push_str(&join.condition);
            }
            JoinType::Outer => {
                return Err(QmError::UnsupportedJoin {
                    table: join.table.clone(),
                    kind: join.kind,
                });
            }
        }
    }

    let mut params = Vec::with_capacity(store.wheres.len());
    let mut marks = Vec::with_capacity(store.wheres.len());
    for (i, clause) in store.wheres.iter().enumerate() {
        if i == 0 {
            sql.push_str(" WHERE ");
        } else {
            sql.push(' ');
            sql.push_str(clause.logical.as_str());
            sql.push(' ');
        }
        sql.push_str(&clause.field);
        sql.push(' ');
        sql.push_str(clause.operator.as_str());
        sql.push(' ');
        marks.push(sql.len());
        sql.push('?');
        params.push(clause.value.clone());
    }

    if store.groups.is_not_empty() {
        let fields: Vec<&str> = store.groups.iter().map(|g| g.field.as_str()).collect();
        sql.push_str(" GROUP BY ");
        sql.push_str(&fields.join(", "));
    }

    if store.orders.is_not_empty() {
        let entries: Vec<String> = store
            .orders
            .iter()
            .map(|o| format!("{} {}", o.field, o.direction))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&entries.join(", "));
    }

    Ok(CompiledQuery { sql, params, marks })
}
