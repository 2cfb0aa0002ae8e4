//! Clause types and the accumulating clause store.

use crate::error::{QmError, QmResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WhereOp {
    /// `=`
    #[default]
    #[serde(rename = "=")]
    Eq,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>=`
    #[serde(rename = ">=")]
    Gte,
    /// `<=`
    #[serde(rename = "<=")]
    Lte,
    /// `<>`
    #[serde(rename = "<>")]
    Ne,
}

impl WhereOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereOp::Eq => "=",
            WhereOp::Gt => ">",
            WhereOp::Lt => "<",
            WhereOp::Gte => ">=",
            WhereOp::Lte => "<=",
            WhereOp::Ne => "<>",
        }
    }
}

impl fmt::Display for WhereOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhereOp {
    type Err = QmError;

    fn from_str(s: &str) -> QmResult<Self> {
        match s.trim() {
            "=" => Ok(WhereOp::Eq),
            ">" => Ok(WhereOp::Gt),
            "<" => Ok(WhereOp::Lt),
            ">=" => Ok(WhereOp::Gte),
            "<=" => Ok(WhereOp::Lte),
            "<>" => Ok(WhereOp::Ne),
            other => Err(QmError::invalid_usage(format!(
                "unknown where operator '{other}'"
            ))),
        }
    }
}

/// Conjunction placed before a non-leading WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOp {
    type Err = QmError;

    fn from_str(s: &str) -> QmResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("AND") {
            Ok(LogicalOp::And)
        } else if s.eq_ignore_ascii_case("OR") {
            Ok(LogicalOp::Or)
        } else {
            Err(QmError::invalid_usage(format!(
                "unknown logical operator '{s}'"
            )))
        }
    }
}

/// Join kind.
///
/// Every variant must be handled by the compiler; kinds without a rendering
/// rule are rejected at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    Inner,
    Outer,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Outer => "OUTER",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QmError;

    fn from_str(s: &str) -> QmResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Direction::Desc)
        } else {
            Err(QmError::invalid_usage(format!("unknown order direction '{s}'")))
        }
    }
}

/// A single WHERE predicate together with its bound value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereClause {
    pub field: String,
    pub operator: WhereOp,
    /// Ignored for the first clause.
    pub logical: LogicalOp,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinClause {
    pub table: String,
    pub condition: String,
    pub kind: JoinType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderClause {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupClause {
    pub field: String,
}

/// Accumulated, not yet compiled, SELECT state.
///
/// Bound values live inside [`WhereClause`], so placeholders and params stay
/// aligned even when one field is filtered twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClauseStore {
    pub(crate) selects: Vec<String>,
    pub(crate) wheres: Vec<WhereClause>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) orders: Vec<OrderClause>,
    pub(crate) groups: Vec<GroupClause>,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selects(&self) -> &[String] {
        &self.selects
    }

    pub fn wheres(&self) -> &[WhereClause] {
        &self.wheres
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn orders(&self) -> &[OrderClause] {
        &self.orders
    }

    pub fn groups(&self) -> &[GroupClause] {
        &self.groups
    }

    /// Bound values in WHERE clause order.
    pub fn bound_values(&self) -> impl Iterator<Item = &str> {
        self.wheres.iter().map(|w| w.value.as_str())
    }

    /// True when no clause of any kind has been recorded.
    pub fn is_empty(&self) -> bool {
        self.selects.is_empty()
            && self.wheres.is_empty()
            && self.joins.is_empty()
            && self.orders.is_empty()
            && self.groups.is_empty()
    }

    /// Drop every clause and bound value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
