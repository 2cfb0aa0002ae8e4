use tracing::Level;

/// Behaviour knobs for a [`QueryManager`](crate::QueryManager).
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Clear the clause store right after a statement is dispatched.
    pub reset_after_execute: bool,
    /// Tracing level for dispatched statements.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            reset_after_execute: true,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl ManagerConfig {
    /// Create a configuration with defaults (reset after execute, DEBUG logs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether execution clears the builder.
    pub fn with_reset_after_execute(mut self, reset: bool) -> Self {
        self.reset_after_execute = reset;
        self
    }

    /// Override the tracing event level.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
