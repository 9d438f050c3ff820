//! Core types for daybook.
//!
//! - `task` and `recurrence`: the task model and the rules deciding which days a task occurs on
//! - `classify` and `views`: day classification, keyword categories, month grid and agenda
//! - `store` and `config`: the JSON task repository and TOML configuration

pub mod classify;
pub mod config;
pub mod date_range;
pub mod error;
pub mod recurrence;
pub mod store;
pub mod task;
pub mod views;

pub use classify::{CategoryRule, CategoryRules, DayKind};
pub use error::{DaybookError, DaybookResult};
pub use recurrence::{has_any_task, is_active, tasks_active_on};
pub use task::{Recurrence, Task, TaskId};
