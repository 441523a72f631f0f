use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campuserp_core::TransactionId;

/// What happened to the referenced transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Edited,
    Approved,
    DeleteRequested,
    Deleted,
}

/// Immutable record of an edit/approve/delete action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub ref_id: TransactionId,
    pub action: AuditAction,
    pub user: String,
    pub date: DateTime<Utc>,
    pub extra_info: String,
}

/// Append-only audit trail. Entries are never edited or pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    entries: Vec<AuditLogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        ref_id: TransactionId,
        action: AuditAction,
        user: impl Into<String>,
        extra_info: impl Into<String>,
    ) {
        let entry = AuditLogEntry {
            ref_id,
            action,
            user: user.into(),
            date: Utc::now(),
            extra_info: extra_info.into(),
        };
        tracing::info!(ref_id = %entry.ref_id, action = ?entry.action, user = %entry.user, "audit entry recorded");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries referencing one transaction, oldest first.
    pub fn for_transaction(&self, ref_id: TransactionId) -> Vec<&AuditLogEntry> {
        self.entries.iter().filter(|e| e.ref_id == ref_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_accumulate_in_order() {
        let mut log = AuditLog::new();
        let id = TransactionId::new();
        log.record(id, AuditAction::Edited, "accountant", "amount 100 -> 150");
        log.record(id, AuditAction::Deleted, "admin", "confirmed");

        assert_eq!(log.len(), 2);
        let for_tx = log.for_transaction(id);
        assert_eq!(for_tx[0].action, AuditAction::Edited);
        assert_eq!(for_tx[1].action, AuditAction::Deleted);
    }

    #[test]
    fn lookup_filters_by_reference() {
        let mut log = AuditLog::new();
        log.record(TransactionId::new(), AuditAction::Approved, "admin", "");
        assert!(log.for_transaction(TransactionId::new()).is_empty());
    }
}
