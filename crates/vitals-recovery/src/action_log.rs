use std::collections::VecDeque;

use vitals_core::models::RecoveryAction;

/// Append-only, capacity-bounded recovery audit trail. Index 0 is newest.
#[derive(Debug, Clone)]
pub struct ActionLog {
    actions: VecDeque<RecoveryAction>,
    capacity: usize,
}

impl ActionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            actions: VecDeque::new(),
            capacity,
        }
    }

    /// Seed from persisted actions (newest first), keeping at most `capacity`.
    pub fn with_actions(capacity: usize, actions: Vec<RecoveryAction>) -> Self {
        let mut log = Self::new(capacity);
        log.actions = actions.into_iter().take(capacity).collect();
        log
    }

    pub fn record(&mut self, action: RecoveryAction) {
        tracing::info!(
            event = "recovery_action",
            action_type = ?action.action_type,
            success = action.success,
            reason = %action.reason,
            "recovery action recorded"
        );
        self.actions.push_front(action);
        self.actions.truncate(self.capacity);
    }

    /// The most recently recorded action.
    pub fn latest(&self) -> Option<&RecoveryAction> {
        self.actions.front()
    }

    pub fn recent(&self, n: usize) -> Vec<RecoveryAction> {
        self.actions.iter().take(n).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecoveryAction> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
