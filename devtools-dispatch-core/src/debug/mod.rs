//! Debug and inspection utilities
//!
//! - **Action Logging**: Pattern-based filtering for action logs, with an
//!   optional in-memory ring buffer recording what happened to each action

pub mod action_logger;

pub use action_logger::{
    glob_match, ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig,
    ActionLoggerMiddleware, ActionOutcome, SharedActionLog,
};
