//! One-shot deferred actions.
//!
//! Nothing here can be cancelled.  Instead every action carries the
//! generation of the state it was scheduled against, and the controller
//! ignores it when that state has moved on.

use crate::entities::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Re-open the ship's fire gate after a shot.
    EnableFire { ship: EntityId, generation: u64 },
    /// Remove a transient overlay message.
    ClearMessage { generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    due_ms: u64,
    action: Deferred,
}

#[derive(Clone, Debug, Default)]
pub struct Timers {
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: Deferred) {
        self.pending.push(Pending {
            due_ms: now_ms.saturating_add(delay_ms),
            action,
        });
    }

    /// Remove and return every action due at `now_ms`, earliest first.
    /// Actions due at the same instant keep their scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<Deferred> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by_key(|p| p.due_ms);
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
