use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One saved snapshot: an opaque encoded-image string as handed back by the
/// host, plus a stable id for list selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub encoded: String,
}

/// Append-only snapshot history, newest first in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot acknowledged by the host; returns its id.
    pub fn record(&mut self, encoded: String) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push_front(HistoryEntry { id, encoded });
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in display order (newest first).
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_displays_first() {
        let mut history = History::new();
        history.record("first".to_owned());
        history.record("second".to_owned());

        let order: Vec<&str> = history.iter().map(|e| e.encoded.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[test]
    fn lookup_by_id() {
        let mut history = History::new();
        let id = history.record("snapshot".to_owned());
        history.record("other".to_owned());

        assert_eq!(history.get(id).map(|e| e.encoded.as_str()), Some("snapshot"));
        assert_eq!(history.get(Uuid::new_v4()), None);
    }
}
