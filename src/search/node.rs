//! Search node bookkeeping (spec §4.K): per-state status, best-known cost,
//! and the parent pointer/creating action needed to reconstruct a plan.

use super::StateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    New,
    Open,
    Closed,
    DeadEnd,
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub status: NodeStatus,
    pub g: u64,
    pub h: Option<u64>,
    pub parent: Option<StateId>,
    pub creating_action: Option<super::ActionId>,
}

impl SearchNode {
    pub fn new() -> Self {
        SearchNode { status: NodeStatus::New, g: u64::MAX, h: None, parent: None, creating_action: None }
    }

    pub fn f(&self) -> Option<u64> {
        self.h.map(|h| self.g.saturating_add(h))
    }
}

impl Default for SearchNode {
    fn default() -> Self {
        Self::new()
    }
}
