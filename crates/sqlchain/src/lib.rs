//! # sqlchain
//!
//! A fluent builder for parameterized SELECT statements.
//!
//! ## Features
//!
//! - **Chained clauses**: select, where / and_where / or_where, inner_join,
//!   group_by, order_by accumulate in call order
//! - **Parameter-safe**: every WHERE value becomes a `?` marker with a
//!   positionally aligned bind value
//! - **Deterministic**: clauses always render as SELECT, FROM, JOIN, WHERE,
//!   GROUP BY, ORDER BY
//! - **Pluggable execution**: any [`QueryExecutor`] runs the compiled
//!   statement; `tokio-postgres` clients and `deadpool` pools work out of the box
//!
//! ```ignore
//! use sqlchain::{QueryManager, WhereOp};
//!
//! let mut qm = QueryManager::new("users", pool);
//! qm.select("name, age")
//!     .where_("name", WhereOp::Eq, "oke")
//!     .and_where("age", WhereOp::Eq, "20")?;
//!
//! let stmt = qm.compile()?;
//! assert_eq!(stmt.sql(), "SELECT name, age FROM users WHERE name = ? AND age = ?");
//! assert_eq!(stmt.params(), ["oke", "20"]);
//!
//! // Hand it off; the builder is reset before the callback can run.
//! qm.execute(|result| match result {
//!     Ok(rows) => println!("{} rows", rows.len()),
//!     Err(err) => eprintln!("query failed: {err}"),
//! })?;
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod executor;
pub mod helper;
mod log;
pub mod manager;
pub mod store;

pub use compile::CompiledQuery;
pub use config::ManagerConfig;
pub use error::{QmError, QmResult};
pub use executor::QueryExecutor;
pub use helper::{IsNotEmpty, is_comma_exist, is_not_empty, prepare_escaped_value, prepare_value};
pub use manager::QueryManager;
pub use store::{
    ClauseStore, Direction, GroupClause, JoinClause, JoinType, LogicalOp, OrderClause, WhereClause,
    WhereOp,
};

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "postgres")]
pub use tokio_postgres;
