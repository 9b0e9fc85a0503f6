//! Reading session value types.

use crate::model::content::EntityId;
use serde::{Deserialize, Serialize};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing selected, timer stopped.
    Idle,
    /// Selection present, timer stopped.
    SelectedPaused,
    /// Selection present, timer running.
    SelectedActive,
}

/// Persistable part of a session. Progress is not stored; it is derived from
/// the selection and catalog order on restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub selected_id: Option<EntityId>,
    pub elapsed_seconds: u64,
}
