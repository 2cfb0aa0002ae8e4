//! `tracing` output for dispatched statements.

use crate::compile::CompiledQuery;
use crate::config::ManagerConfig;
use std::borrow::Cow;
use tracing::Level;

/// Cut `sql` to at most `max` bytes (backing off to a char boundary) and
/// mark the cut with `...`.
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> Cow<'_, str> {
    let Some(max) = max.filter(|&max| sql.len() > max) else {
        return Cow::Borrowed(sql);
    };
    let cut = (0..=max).rev().find(|&i| sql.is_char_boundary(i)).unwrap_or(0);
    Cow::Owned(format!("{}...", &sql[..cut]))
}

/// Emit the statement about to be handed to the executor.
pub(crate) fn log_dispatch(config: &ManagerConfig, table: &str, stmt: &CompiledQuery, reset: bool) {
    let sql = truncate_sql(stmt.sql(), config.max_sql_length);
    let param_count = stmt.params().len();

    // `event!` needs a constant level.
    macro_rules! dispatched {
        ($level:expr) => {
            tracing::event!(
                target: "sqlchain.sql",
                $level,
                table,
                param_count,
                reset,
                sql = %sql,
                "dispatching query"
            )
        };
    }

    if config.log_level == Level::TRACE {
        dispatched!(Level::TRACE);
    } else if config.log_level == Level::DEBUG {
        dispatched!(Level::DEBUG);
    } else if config.log_level == Level::INFO {
        dispatched!(Level::INFO);
    } else if config.log_level == Level::WARN {
        dispatched!(Level::WARN);
    } else {
        dispatched!(Level::ERROR);
    }
}
