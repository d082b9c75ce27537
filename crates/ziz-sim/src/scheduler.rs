//! Deferred event queue.
//!
//! Single-threaded: events are drained by the engine at a fixed point in
//! each tick. Every scheduled event gets a token that can cancel it until
//! it fires.

use std::collections::{BTreeMap, HashMap};

use ziz_core::types::EventToken;

/// What happens when a scheduled event comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledKind {
    /// The projectile reached its lifetime.
    ProjectileExpiry { projectile: hecs::Entity },
    /// The dead target comes back.
    TargetRespawn,
}

/// An event that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub token: EventToken,
    pub due_tick: u64,
    pub kind: ScheduledKind,
}

/// Pending events ordered by due tick, then by scheduling order.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: BTreeMap<(u64, u64), ScheduledKind>,
    due_by_token: HashMap<EventToken, u64>,
    next_token: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire on `due_tick`.
    pub fn schedule(&mut self, due_tick: u64, kind: ScheduledKind) -> EventToken {
        let token = EventToken(self.next_token);
        self.next_token += 1;
        self.pending.insert((due_tick, token.0), kind);
        self.due_by_token.insert(token, due_tick);
        token
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: EventToken) -> bool {
        match self.due_by_token.remove(&token) {
            Some(due_tick) => self.pending.remove(&(due_tick, token.0)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, token: EventToken) -> bool {
        self.due_by_token.contains_key(&token)
    }

    /// Remove and return every event due at or before `now`.
    pub fn drain_due(&mut self, now: u64) -> Vec<ScheduledEvent> {
        let later = self.pending.split_off(&(now.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_iter()
            .map(|((due_tick, token), kind)| {
                let token = EventToken(token);
                self.due_by_token.remove(&token);
                ScheduledEvent {
                    token,
                    due_tick,
                    kind,
                }
            })
            .collect()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.due_by_token.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
