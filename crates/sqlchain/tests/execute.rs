use sqlchain::{CompiledQuery, ManagerConfig, QmError, QmResult, QueryExecutor, QueryManager, WhereOp};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, oneshot};

/// Records every statement it receives and echoes the params back.
#[derive(Clone, Default)]
struct RecordingExecutor {
    seen: Arc<Mutex<Vec<CompiledQuery>>>,
    gate: Option<Arc<Notify>>,
    fail: bool,
}

impl RecordingExecutor {
    /// Holds every run until `release` is called.
    fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    fn seen(&self) -> Vec<CompiledQuery> {
        self.seen.lock().unwrap().clone()
    }
}

impl QueryExecutor for RecordingExecutor {
    type Output = Vec<String>;

    async fn run(&self, statement: CompiledQuery) -> QmResult<Self::Output> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.seen.lock().unwrap().push(statement.clone());
        if self.fail {
            return Err(QmError::execution("connection refused"));
        }
        Ok(statement.params().to_vec())
    }
}

#[tokio::test]
async fn execute_resets_before_callback_fires() -> QmResult<()> {
    let exec = RecordingExecutor::gated();
    let mut qm = QueryManager::new("users", exec.clone());
    qm.where_("name", WhereOp::Eq, "oke")
        .and_where("age", WhereOp::Eq, "20")?;

    let (tx, rx) = oneshot::channel();
    let handle = qm.execute(move |result| {
        let _ = tx.send(result);
    })?;

    // The executor is still blocked, yet the builder is already empty.
    assert!(qm.is_empty());
    let q = qm.compile()?;
    assert_eq!(q.sql(), "SELECT * FROM users");
    assert!(q.params().is_empty());

    exec.release();
    let params = rx.await.expect("callback dropped")?;
    assert_eq!(params, ["oke", "20"]);
    handle.await.expect("execute task panicked");

    let seen = exec.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].sql(),
        "SELECT * FROM users WHERE name = ? AND age = ?"
    );
    Ok(())
}

#[tokio::test]
async fn execute_without_reset_keeps_clauses() -> QmResult<()> {
    let exec = RecordingExecutor::default();
    let mut qm = QueryManager::new("users", exec.clone());
    qm.select("id").where_eq("id", "1");

    let handle = qm.execute_with_reset(|_| {}, false)?;
    handle.await.expect("execute task panicked");

    assert_eq!(
        qm.compile()?.sql(),
        "SELECT id FROM users WHERE id = ?"
    );
    assert_eq!(exec.seen().len(), 1);
    Ok(())
}

#[tokio::test]
async fn config_can_disable_reset() -> QmResult<()> {
    let exec = RecordingExecutor::default();
    let config = ManagerConfig::new().with_reset_after_execute(false);
    let mut qm = QueryManager::with_config("users", exec.clone(), config);
    qm.where_eq("id", "1");

    qm.execute(|_| {})?.await.expect("execute task panicked");
    qm.execute(|_| {})?.await.expect("execute task panicked");

    let seen = exec.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert!(!qm.is_empty());
    Ok(())
}

#[tokio::test]
async fn compile_error_is_returned_synchronously() {
    let exec = RecordingExecutor::default();
    let mut qm = QueryManager::new("users u", exec.clone());
    qm.outer_join("roles r", "u.role_id = r.id");

    let err = qm.execute(|_| panic!("callback must not run")).unwrap_err();
    assert!(err.is_unsupported_join());
    // Nothing was dispatched and nothing was cleared.
    assert!(!qm.is_empty());
    tokio::task::yield_now().await;
    assert!(exec.seen().is_empty());
}

#[tokio::test]
async fn execution_error_reaches_callback() -> QmResult<()> {
    let exec = RecordingExecutor::failing();
    let mut qm = QueryManager::new("users", exec);
    qm.where_eq("id", "1");

    let (tx, rx) = oneshot::channel();
    qm.execute(move |result| {
        let _ = tx.send(result);
    })?;

    let err = rx.await.expect("callback dropped").unwrap_err();
    assert!(matches!(err, QmError::Execution(ref msg) if msg == "connection refused"));
    assert!(qm.is_empty());
    Ok(())
}

#[tokio::test]
async fn fetch_returns_result_and_resets() -> QmResult<()> {
    let exec = RecordingExecutor::default();
    let mut qm = QueryManager::new("orders", exec.clone());
    qm.where_("amount", WhereOp::Gte, "100")
        .and_where("amount", WhereOp::Lte, "500")?;

    let pending = qm.fetch();
    assert!(qm.is_empty());

    let params = pending.await?;
    assert_eq!(params, ["100", "500"]);
    assert_eq!(
        exec.seen()[0].sql(),
        "SELECT * FROM orders WHERE amount >= ? AND amount <= ?"
    );
    Ok(())
}

#[tokio::test]
async fn fetch_surfaces_compile_error_without_reset() {
    let exec = RecordingExecutor::default();
    let mut qm = QueryManager::new("users", exec.clone());
    qm.outer_join("teams t", "t.id = users.team_id");

    let err = qm.fetch().await.unwrap_err();
    assert!(err.is_unsupported_join());
    assert!(!qm.is_empty());
    assert!(exec.seen().is_empty());
}

#[tokio::test]
async fn shared_executor_behind_arc() -> QmResult<()> {
    let exec = Arc::new(RecordingExecutor::default());
    let mut users = QueryManager::new("users", Arc::clone(&exec));
    let mut orders = QueryManager::new("orders", Arc::clone(&exec));

    users.where_eq("id", "1").fetch().await?;
    orders.select("total").fetch().await?;

    let sqls: Vec<String> = exec.seen().iter().map(|q| q.sql().to_string()).collect();
    assert_eq!(
        sqls,
        ["SELECT * FROM users WHERE id = ?", "SELECT total FROM orders"]
    );
    Ok(())
}

#[test]
fn execute_outside_runtime_fails() {
    let mut qm = QueryManager::new("users", RecordingExecutor::default());
    qm.where_eq("id", "1");

    let err = qm.execute(|_| {}).unwrap_err();
    assert!(matches!(err, QmError::NoRuntime));
    assert!(!qm.is_empty());
}
