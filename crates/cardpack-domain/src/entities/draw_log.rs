//! Draw log aggregate.

use crate::events::DrawCompleted;
use cardpack_core::{AggregateRoot, CardId, DrawLogId, Entity, PackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Write-once record of a completed draw.
///
/// There is no update or delete path. The card count matching the pack's
/// `cards_per_pack` is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawLog {
    id: DrawLogId,
    pack_id: PackId,
    card_ids: Vec<CardId>,
    executed_at: DateTime<Utc>,
    #[serde(skip)]
    pending_events: Vec<DrawCompleted>,
}

impl DrawLog {
    /// Records a new draw with a fresh id and the current time.
    #[must_use]
    pub fn create(pack_id: PackId, card_ids: Vec<CardId>) -> Self {
        let id = DrawLogId::new();
        let executed_at = Utc::now();
        let event = DrawCompleted::new(id, pack_id.clone(), card_ids.clone(), executed_at);

        Self {
            id,
            pack_id,
            card_ids,
            executed_at,
            pending_events: vec![event],
        }
    }

    /// Rehydrates a stored draw log.
    #[must_use]
    pub fn reconstruct(
        id: DrawLogId,
        pack_id: PackId,
        card_ids: Vec<CardId>,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            pack_id,
            card_ids,
            executed_at,
            pending_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn pack_id(&self) -> &PackId {
        &self.pack_id
    }

    /// Drawn card ids in draw order, duplicates included.
    #[must_use]
    pub fn card_ids(&self) -> &[CardId] {
        &self.card_ids
    }

    #[must_use]
    pub const fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }
}

impl PartialEq for DrawLog {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.pack_id == other.pack_id
            && self.card_ids == other.card_ids
            && self.executed_at == other.executed_at
    }
}

impl Eq for DrawLog {}

impl Entity<DrawLogId> for DrawLog {
    fn id(&self) -> &DrawLogId {
        &self.id
    }
}

impl AggregateRoot<DrawLogId> for DrawLog {
    type Event = DrawCompleted;

    fn pending_events(&self) -> &[DrawCompleted] {
        &self.pending_events
    }

    fn take_pending_events(&mut self) -> Vec<DrawCompleted> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u32]) -> Vec<CardId> {
        values.iter().map(|v| CardId::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_create_records_event() {
        let pack_id = PackId::parse("starter").unwrap();
        let log = DrawLog::create(pack_id.clone(), ids(&[4, 4, 1]));

        assert_eq!(log.pending_events().len(), 1);
        let event = &log.pending_events()[0];
        assert_eq!(event.log_id, *log.id());
        assert_eq!(event.pack_id, pack_id);
        assert_eq!(event.card_ids, ids(&[4, 4, 1]));
        assert_eq!(event.drawn_at, log.executed_at());
    }

    #[test]
    fn test_take_pending_events_drains() {
        let mut log = DrawLog::create(PackId::parse("starter").unwrap(), ids(&[1]));
        assert_eq!(log.take_pending_events().len(), 1);
        assert!(log.pending_events().is_empty());
        assert!(log.take_pending_events().is_empty());
    }

    #[test]
    fn test_reconstruct_has_no_events() {
        let id = DrawLogId::new();
        let at = Utc::now();
        let log = DrawLog::reconstruct(id, PackId::parse("starter").unwrap(), ids(&[2, 9]), at);

        assert_eq!(*log.id(), id);
        assert_eq!(log.card_ids(), ids(&[2, 9]).as_slice());
        assert!(log.pending_events().is_empty());
    }

    #[test]
    fn test_equality_ignores_pending_events() {
        let mut log = DrawLog::create(PackId::parse("starter").unwrap(), ids(&[1, 2]));
        let copy = log.clone();
        log.take_pending_events();
        assert_eq!(log, copy);
    }

    #[test]
    fn test_serialization_skips_pending_events() {
        let log = DrawLog::create(PackId::parse("starter").unwrap(), ids(&[1]));
        let json = serde_json::to_string(&log).unwrap();
        assert!(!json.contains("pending_events"));

        let restored: DrawLog = serde_json::from_str(&json).unwrap();
        assert!(restored.pending_events().is_empty());
        assert_eq!(restored, log);
    }
}
