//! Pending-set computation for the DM campaign.

use std::collections::HashSet;

use crate::server::model::campaign::RecipientId;

/// Returns the candidates not yet in the sent set, in candidate order.
///
/// Runs in O(|candidates| + |sent|): membership is a hash lookup.
pub fn compute_pending(
    candidates: &[RecipientId],
    sent: &HashSet<RecipientId>,
) -> Vec<RecipientId> {
    candidates
        .iter()
        .filter(|id| !sent.contains(*id))
        .cloned()
        .collect()
}
