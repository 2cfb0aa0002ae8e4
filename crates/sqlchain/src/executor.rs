//! The executor seam and the execute paths of [`QueryManager`].

use crate::compile::CompiledQuery;
use crate::error::{QmError, QmResult};
use crate::manager::QueryManager;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Something that can run a compiled statement.
///
/// The SQL text and its parameters arrive together as one [`CompiledQuery`];
/// how they are bound (server-side parameters, inlined literals, ...) is up
/// to the implementation. Timeouts, retries and cancellation belong here too.
pub trait QueryExecutor: Send + Sync {
    /// Rows (or whatever the backend returns) for a successful run.
    type Output: Send + 'static;

    /// Run `statement` and return its result.
    fn run(
        &self,
        statement: CompiledQuery,
    ) -> impl Future<Output = QmResult<Self::Output>> + Send;
}

impl<E: QueryExecutor> QueryExecutor for Arc<E> {
    type Output = E::Output;

    fn run(
        &self,
        statement: CompiledQuery,
    ) -> impl Future<Output = QmResult<Self::Output>> + Send {
        (**self).run(statement)
    }
}

impl<E> QueryManager<E>
where
    E: QueryExecutor + Clone + 'static,
{
    /// Dispatch the current statement and report the outcome to `on_result`.
    ///
    /// Returns as soon as the statement is handed off; `on_result` runs on the
    /// current Tokio runtime once the executor finishes. With
    /// [`reset_after_execute`](crate::ManagerConfig::reset_after_execute) set
    /// (the default) the builder is already empty when this returns.
    ///
    /// A compile failure is returned directly and leaves the builder intact.
    pub fn execute<F>(&mut self, on_result: F) -> QmResult<JoinHandle<()>>
    where
        F: FnOnce(QmResult<E::Output>) + Send + 'static,
    {
        let reset = self.config().reset_after_execute;
        self.execute_with_reset(on_result, reset)
    }

    /// [`execute`](Self::execute) with an explicit reset choice.
    pub fn execute_with_reset<F>(&mut self, on_result: F, reset: bool) -> QmResult<JoinHandle<()>>
    where
        F: FnOnce(QmResult<E::Output>) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| QmError::NoRuntime)?;
        // Reset before spawning: the callback must never see dispatched clauses.
        let statement = self.take_statement(reset)?;
        let executor = self.executor().clone();

        Ok(runtime.spawn(async move {
            let result = executor.run(statement).await;
            if let Err(err) = &result {
                tracing::debug!(target: "sqlchain.sql", error = %err, "query failed");
            }
            on_result(result);
        }))
    }

    /// Dispatch the current statement and await its result.
    ///
    /// The statement is compiled (and the builder reset, per config) before
    /// the returned future is first polled.
    pub fn fetch(&mut self) -> impl Future<Output = QmResult<E::Output>> + Send + use<E> {
        let reset = self.config().reset_after_execute;
        let prepared = self.take_statement(reset);
        let executor = self.executor().clone();
        async move { executor.run(prepared?).await }
    }
}
