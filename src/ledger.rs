use serde::{Deserialize, Serialize};

use crate::ev::Action;

/// One logged decision and its realized outcome. Created by
/// [`SessionLedger::add_hand`], never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLogEntry {
    pub sequence_id: u32,
    pub pot: f32,
    pub action: Action,
    pub ev_at_decision: f32,
    pub realized_result: f32,
    pub bankroll_after: f32,
}

/// Append-only record of a session's decisions with a running bankroll.
/// Caller-owned; one logical writer at a time.
#[derive(Debug, Clone, Serialize)]
pub struct SessionLedger {
    starting_bankroll: f32,
    bankroll: f32,
    entries: Vec<HandLogEntry>,
}

impl SessionLedger {
    pub fn new(starting_bankroll: f32) -> Self {
        Self {
            starting_bankroll,
            bankroll: starting_bankroll,
            entries: Vec::new(),
        }
    }

    /// Appends an entry with the next 1-based sequence id, advances the
    /// bankroll by `realized_result`, and returns a copy of the entry.
    pub fn add_hand(
        &mut self,
        pot: f32,
        action: Action,
        ev: f32,
        realized_result: f32,
    ) -> HandLogEntry {
        self.bankroll += realized_result;
        let entry = HandLogEntry {
            sequence_id: self.entries.len() as u32 + 1,
            pot,
            action,
            ev_at_decision: ev,
            realized_result,
            bankroll_after: self.bankroll,
        };
        self.entries.push(entry);
        entry
    }

    /// Logged hands in insertion order.
    pub fn history(&self) -> &[HandLogEntry] {
        &self.entries
    }

    pub fn bankroll(&self) -> f32 {
        self.bankroll
    }

    pub fn starting_bankroll(&self) -> f32 {
        self.starting_bankroll
    }

    pub fn hands_logged(&self) -> u32 {
        self.entries.len() as u32
    }
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bankroll_accumulates_realized_results() {
        let mut ledger = SessionLedger::new(100.0);
        ledger.add_hand(10.0, Action::Call, 7.0, 15.0);
        ledger.add_hand(8.0, Action::Fold, 0.0, -3.0);
        assert_eq!(ledger.bankroll(), 112.0);
        assert_eq!(ledger.starting_bankroll(), 100.0);
    }

    #[test]
    fn sequence_ids_are_monotonic_from_one() {
        let mut ledger = SessionLedger::default();
        for i in 0..4 {
            let entry = ledger.add_hand(5.0, Action::Raise, 1.0, i as f32);
            assert_eq!(entry.sequence_id, i + 1);
        }
        let ids: Vec<u32> = ledger.history().iter().map(|e| e.sequence_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
