// Active-orders board state.
//
// Owns the in-memory order list between polls. Free of I/O: the CLI feeds
// it fetch results and confirmation outcomes, so the sequencing rules
// (stale-response discard, per-order confirm gate, optimistic patch) are
// testable without a backend.

use std::collections::HashSet;

use crate::infer::stage_to_confirm;
use crate::models::{Order, Stage, StageRecord, StageRecordStatus};

#[derive(Debug, Default)]
pub struct OrdersBoard {
    orders: Vec<Order>,
    /// Ticket handed to the most recently issued fetch.
    issued_fetch: u64,
    /// Ticket of the last fetch whose response was applied.
    applied_fetch: u64,
    /// Order ids with an outstanding confirmation.
    in_flight: HashSet<String>,
}

impl OrdersBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Take a ticket for a poll about to be issued. Tickets only grow, so
    /// a response can always be ordered against the board's current state.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_fetch += 1;
        self.issued_fetch
    }

    /// Apply a poll response. Returns false (and changes nothing) when a
    /// response carrying a newer ticket has already been applied; overlapping
    /// polls therefore cannot roll the board back. A failed poll simply never
    /// calls this, keeping the last-known list on screen.
    pub fn apply_fetch(&mut self, ticket: u64, mut orders: Vec<Order>) -> bool {
        if ticket <= self.applied_fetch {
            return false;
        }
        self.applied_fetch = ticket;
        // The client already filters, but the board never shows COMPLETED
        orders.retain(|order| order.is_active());
        self.orders = orders;
        true
    }

    /// Gate a confirmation for one order. Returns false while a previous
    /// confirmation for the same order is still outstanding; other orders
    /// are unaffected (orders are independent).
    pub fn begin_confirm(&mut self, order_id: &str) -> bool {
        self.in_flight.insert(order_id.to_string())
    }

    /// Release the gate, on success or failure.
    pub fn finish_confirm(&mut self, order_id: &str) {
        self.in_flight.remove(order_id);
    }

    pub fn confirm_in_flight(&self, order_id: &str) -> bool {
        self.in_flight.contains(order_id)
    }

    /// Optimistically record a confirmed stage as DONE with a finish time of
    /// now, for immediate feedback. The patch is transient: the next applied
    /// fetch replaces the whole list with the backend's view.
    pub fn apply_confirmation(&mut self, order_id: &str, stage: Stage) {
        let Some(order) = self.orders.iter_mut().find(|o| o.order_id == order_id) else {
            return;
        };
        let now = chrono::Utc::now().to_rfc3339();
        if let Some(record) = order
            .stages
            .iter_mut()
            .find(|r| r.stage() == Some(stage) && !r.status.is_done())
        {
            record.status = StageRecordStatus::Done;
            record.finished_at = Some(now);
        } else {
            order.stages.push(StageRecord {
                step_name: stage.as_str().to_string(),
                status: StageRecordStatus::Done,
                started_at: None,
                finished_at: Some(now),
            });
        }
    }

    /// The stage a given order currently offers for confirmation.
    pub fn stage_for(&self, order_id: &str) -> Option<Stage> {
        self.orders
            .iter()
            .find(|o| o.order_id == order_id)
            .and_then(|o| stage_to_confirm(&o.stages))
    }

    /// Find orders by full id or by the short suffix shown on cards.
    pub fn find<'a>(&'a self, query: &str) -> Vec<&'a Order> {
        find_orders(&self.orders, query)
    }
}

/// Match orders against a full id or a trailing fragment of one (cards show
/// the last 8 characters). An exact match always wins outright.
pub fn find_orders<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    if query.is_empty() {
        return Vec::new();
    }
    if let Some(exact) = orders.iter().find(|o| o.order_id == query) {
        return vec![exact];
    }
    orders
        .iter()
        .filter(|o| o.order_id.ends_with(query))
        .collect()
}
