// Stage inference over an order's stage history.
//
// The backend owns the real state machine; this is a read-side inference
// that decides which stage the board should offer for manual confirmation.
// Histories arrive as-is: duplicate records per stage, contradictory
// statuses, and unrecognized stage names all occur in practice, so the
// scan is flag-based rather than trusting record order.

use crate::models::{Stage, StageRecord, STAGE_SEQUENCE};

/// The single stage currently eligible for manual confirmation, or None
/// when the order is fully delivered.
///
/// Rules, in order:
/// - An empty history means a brand-new order: COOKING.
/// - The most advanced stage with an IN_PROGRESS record is the candidate.
///   If that same stage also has a DONE record, the IN_PROGRESS is stale
///   and the candidate advances to the next stage (None past DELIVERED).
/// - With no stage IN_PROGRESS, the first stage lacking a DONE record is
///   the candidate.
/// - Every stage DONE through DELIVERED: None.
///
/// Pure and deterministic; re-run on every refresh.
pub fn stage_to_confirm(records: &[StageRecord]) -> Option<Stage> {
    if records.is_empty() {
        return Some(Stage::Cooking);
    }

    let mut in_progress = [false; STAGE_SEQUENCE.len()];
    let mut done = [false; STAGE_SEQUENCE.len()];
    for rec in records {
        // Records with unrecognized stage names carry no signal
        let Some(stage) = rec.stage() else { continue };
        let i = stage as usize;
        if rec.status.is_in_progress() {
            in_progress[i] = true;
        }
        if rec.status.is_done() {
            done[i] = true;
        }
    }

    // Most advanced stage still being worked
    for stage in STAGE_SEQUENCE.iter().rev() {
        let i = *stage as usize;
        if in_progress[i] {
            if done[i] {
                // Contradictory history: DONE wins, the IN_PROGRESS is stale
                return stage.next();
            }
            return Some(*stage);
        }
    }

    // Nothing in progress: first stage not yet finished
    STAGE_SEQUENCE.into_iter().find(|s| !done[*s as usize])
}
