//! Action logging with pattern-based filtering and in-memory storage
//!
//! Provides configurable action logging using glob patterns over action
//! tags to include/exclude specific actions from logs. Supports both
//! tracing output and in-memory ring buffer storage for later inspection.
//!
//! # Example
//!
//! ```ignore
//! use devtools_dispatch_core::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
//!
//! // Log everything except *_START actions (tracing only)
//! let middleware = ActionLoggerMiddleware::new(ActionLoggerConfig::default());
//!
//! // Log with in-memory storage
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::default());
//!
//! let log = middleware.shared_log();
//! store.add_middleware(middleware);
//!
//! if let Some(log) = log {
//!     let log = log.borrow();
//!     for entry in log.recent(10) {
//!         println!("{}: {}", entry.elapsed_display(), entry.summary);
//!     }
//! }
//! ```

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;

use crate::action::ActionSummary;
use crate::error::DispatchError;
use crate::middleware::{Middleware, MiddlewareApi, Next};

fn default_exclude_patterns() -> Vec<String> {
    vec!["*_START".to_string()]
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration for action logging with glob pattern filtering.
///
/// Patterns support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `REQUEST_*` matches REQUEST_TABS_START, REQUEST_EXTENSIONS_SUCCESS, etc.
/// - `*_FAILURE` matches every failure report
/// - `PAGE_SELECTED` matches only PAGE_SELECTED
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    #[serde(rename = "include")]
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
}

impl Default for ActionLoggerConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            // Start markers carry no payload and always precede a result
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Arguments
    /// - `include`: comma-separated glob patterns (or None for all)
    /// - `exclude`: comma-separated glob patterns (or None for default excludes)
    ///
    /// # Example
    /// ```
    /// use devtools_dispatch_core::debug::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("REQUEST_*,PAGE_SELECTED"), Some("*_START"));
    /// assert!(config.should_log("REQUEST_TABS_SUCCESS"));
    /// assert!(config.should_log("PAGE_SELECTED"));
    /// assert!(!config.should_log("REQUEST_TABS_START"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        let include_patterns = include.map(split_patterns).unwrap_or_default();
        let exclude_patterns = exclude
            .map(split_patterns)
            .unwrap_or_else(default_exclude_patterns);

        Self {
            include_patterns,
            exclude_patterns,
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Check if an action tag should be logged based on include/exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

// ============================================================================
// In-Memory Action Log
// ============================================================================

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action tag (from Action::name())
    pub name: &'static str,
    /// Summary representation (from ActionSummary::summary())
    pub summary: String,
    /// Timestamp when the action was logged
    pub timestamp: Instant,
    /// Sequence number for ordering
    pub sequence: u64,
    /// Outcome, set once the rest of the chain returned
    pub outcome: Option<ActionOutcome>,
}

/// What happened to a logged action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The reducer ran; `true` if it produced a new state tree
    Reduced { state_changed: bool },
    /// A later middleware dropped the action
    Dropped,
    /// The dispatch failed
    Failed,
}

impl ActionLogEntry {
    /// Create a new log entry
    pub fn new(name: &'static str, summary: String, sequence: u64) -> Self {
        Self {
            name,
            summary,
            timestamp: Instant::now(),
            sequence,
            outcome: None,
        }
    }

    /// Time since this action was logged
    pub fn elapsed(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }

    /// Format the elapsed time for display (e.g., "2.3s", "150ms")
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.1}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    /// Filter config (reuses ActionLoggerConfig)
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Create with custom capacity and filter
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// In-memory ring buffer for storing recent actions
///
/// Older entries are discarded when capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(ActionLogConfig::default())
    }
}

impl ActionLog {
    /// Create a new action log with configuration
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Log an action (if it passes the filter)
    ///
    /// Returns the sequence number of the new entry, None if filtered out.
    pub fn log<A: ActionSummary>(&mut self, action: &A) -> Option<u64> {
        let name = action.name();
        if self.config.capacity == 0 || !self.config.filter.should_log(name) {
            return None;
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if self.entries.len() >= self.config.capacity {
            self.entries.pop_front();
        }
        self.entries
            .push_back(ActionLogEntry::new(name, action.summary(), sequence));
        Some(sequence)
    }

    /// Record the outcome of a logged action
    ///
    /// Does nothing if the entry was already evicted.
    pub fn set_outcome(&mut self, sequence: u64, outcome: ActionOutcome) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.sequence == sequence)
        {
            entry.outcome = Some(outcome);
        }
    }

    /// Get all entries (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Get the most recent N entries (newest first)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get configuration
    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Action log shared between the middleware and whoever inspects it
pub type SharedActionLog = Rc<RefCell<ActionLog>>;

/// Middleware that logs actions with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only** (default): logs via `tracing::debug!()`
/// - **With storage**: also stores entries in an [`ActionLog`] ring buffer
///
/// The middleware always forwards the action; place it last in the chain to
/// log what actually reaches the reducer. Clones share the same log.
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<SharedActionLog>,
    /// When false, the middleware only forwards.
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Create a new action logger middleware with tracing only (no in-memory storage)
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            active: true,
        }
    }

    /// Create middleware with in-memory storage
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            config: config.filter.clone(),
            log: Some(Rc::new(RefCell::new(ActionLog::new(config)))),
            active: true,
        }
    }

    /// Create with default config and in-memory storage
    pub fn with_default_log() -> Self {
        Self::with_log(ActionLogConfig::default())
    }

    /// Create with no filtering (logs all actions), tracing only
    pub fn log_all() -> Self {
        Self::new(ActionLoggerConfig::with_patterns(vec![], vec![]))
    }

    /// Set whether the middleware is active.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check if the middleware is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Borrow the action log (if storage is enabled)
    pub fn log(&self) -> Option<Ref<'_, ActionLog>> {
        self.log.as_ref().map(|log| log.borrow())
    }

    /// Handle to the action log that stays valid once the middleware has
    /// been moved into a store
    pub fn shared_log(&self) -> Option<SharedActionLog> {
        self.log.clone()
    }

    /// Get a reference to the config
    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }
}

impl<S, A: ActionSummary> Middleware<S, A> for ActionLoggerMiddleware {
    fn name(&self) -> &'static str {
        "action-logger"
    }

    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        if !self.active {
            return next.run(action);
        }

        let name = action.name();
        if self.config.should_log(name) {
            tracing::debug!(action = %name, summary = %action.summary(), "action");
        }
        let sequence = self
            .log
            .as_ref()
            .and_then(|log| log.borrow_mut().log(&action));

        let before = api.state();
        let result = next.run(action);

        if let (Some(log), Some(sequence)) = (self.log.as_ref(), sequence) {
            let outcome = match &result {
                Err(_) => ActionOutcome::Failed,
                Ok(()) if !api.reduced() => ActionOutcome::Dropped,
                Ok(()) => ActionOutcome::Reduced {
                    state_changed: !Arc::ptr_eq(&before, &api.state()),
                },
            };
            log.borrow_mut().set_outcome(sequence, outcome);
        }
        result
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star_pi = None;
    let mut star_ti = 0;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if let Some(spi) = star_pi {
            pi = spi + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}
