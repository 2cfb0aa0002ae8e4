//! [`QueryExecutor`] implementations backed by `tokio-postgres`.
//!
//! Bound values are strings, so they are sent as `E'...'` literals through the
//! simple query protocol and Postgres coerces them to the column type
//! (`age = E'20'` works for an `int4` column). Escape-string literals double
//! both `'` and `\`, so quoting does not depend on
//! `standard_conforming_strings`.

use crate::compile::CompiledQuery;
use crate::error::QmResult;
use crate::executor::QueryExecutor;
use tokio_postgres::{SimpleQueryMessage, SimpleQueryRow};

fn collect_rows(messages: Vec<SimpleQueryMessage>) -> Vec<SimpleQueryRow> {
    messages
        .into_iter()
        .filter_map(|msg| match msg {
            SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        })
        .collect()
}

async fn run_on_client(
    client: &tokio_postgres::Client,
    statement: CompiledQuery,
) -> QmResult<Vec<SimpleQueryRow>> {
    let sql = statement.to_escaped_sql();
    let messages = client.simple_query(&sql).await?;
    let rows = collect_rows(messages);
    tracing::trace!(target: "sqlchain.sql", rows = rows.len(), "query completed");
    Ok(rows)
}

impl QueryExecutor for tokio_postgres::Client {
    type Output = Vec<SimpleQueryRow>;

    async fn run(&self, statement: CompiledQuery) -> QmResult<Self::Output> {
        run_on_client(self, statement).await
    }
}

#[cfg(feature = "pool")]
impl QueryExecutor for deadpool_postgres::Pool {
    type Output = Vec<SimpleQueryRow>;

    async fn run(&self, statement: CompiledQuery) -> QmResult<Self::Output> {
        let client = self.get().await?;
        run_on_client(&client, statement).await
    }
}
