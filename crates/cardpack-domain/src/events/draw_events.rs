//! Draw-related domain events.

use cardpack_core::{CardId, CardpackResult, DomainEvent, DrawLogId, PackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted once a draw log has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCompleted {
    pub log_id: DrawLogId,
    pub pack_id: PackId,
    /// Drawn card ids in draw order.
    pub card_ids: Vec<CardId>,
    pub drawn_at: DateTime<Utc>,
}

impl DrawCompleted {
    #[must_use]
    pub fn new(
        log_id: DrawLogId,
        pack_id: PackId,
        card_ids: Vec<CardId>,
        drawn_at: DateTime<Utc>,
    ) -> Self {
        Self {
            log_id,
            pack_id,
            card_ids,
            drawn_at,
        }
    }
}

impl DomainEvent for DrawCompleted {
    fn event_type(&self) -> &'static str {
        "draw.completed"
    }

    fn aggregate_id(&self) -> String {
        self.log_id.to_string()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.drawn_at
    }

    fn to_json(&self) -> CardpackResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
