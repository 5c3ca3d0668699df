//! First-claim-wins intent resolution.
//!
//! Every living organism proposes an [`IntentSet`] against the same
//! pre-tick snapshot, so proposals can conflict. Resolution shuffles the
//! proposals with the run RNG and walks them once: a proposal is admitted
//! if and only if none of the organism ids it introduces has already been
//! claimed by an earlier admitted proposal. Rejected actors, and every
//! organism that produced no proposal (the dead), are carried over with
//! only their age advanced.
//!
//! Given the same RNG state and the same proposals, resolution is fully
//! deterministic. When no two proposals overlap, shuffle order cannot
//! matter: every proposal is admitted.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use tracing::debug;
use verdure_organisms::{IntentSet, lifecycle};
use verdure_types::{Organism, SimRng, Withdrawal};

use crate::error::TickError;

/// The post-tick population and the world deductions earned by admitted
/// proposals.
#[derive(Debug)]
pub struct Resolution {
    /// The organism records forming the next tick's population.
    pub organisms: Vec<Organism>,
    /// Withdrawals from admitted proposals, to be applied to the world.
    pub withdrawals: Vec<Withdrawal>,
}

/// Resolve one tick's proposals into the next population.
///
/// `pre_tick` is the full pre-tick population; any of its organisms not
/// covered by an admitted proposal is carried over. Carry-over is an
/// age-only update: the organism ages one tick (and may die of old age)
/// but skips metabolism, so a rejected actor is not also charged water
/// and food for an action it never performed.
///
/// # Errors
///
/// Fails only if a carry-over age increment overflows.
pub fn resolve(
    mut proposals: Vec<IntentSet>,
    pre_tick: &[Organism],
    rng: &mut SimRng,
) -> Result<Resolution, TickError> {
    proposals.shuffle(rng);

    let mut claimed: BTreeSet<_> = BTreeSet::new();
    let mut organisms = Vec::new();
    let mut withdrawals = Vec::new();
    let mut admitted = 0_usize;
    let mut rejected = 0_usize;

    for proposal in proposals {
        let conflict =
            claimed.contains(&proposal.actor) || proposal.ids().any(|id| claimed.contains(&id));
        if conflict {
            rejected = rejected.saturating_add(1);
            continue;
        }
        claimed.insert(proposal.actor);
        claimed.extend(proposal.ids());
        organisms.extend(proposal.organisms);
        withdrawals.extend(proposal.withdrawals);
        admitted = admitted.saturating_add(1);
    }

    // Everything not covered by an admitted proposal survives unchanged
    // apart from aging: rejected actors and organisms that never proposed.
    for organism in pre_tick {
        if !claimed.contains(&organism.id) {
            organisms.push(lifecycle::carry_over(organism)?);
        }
    }

    debug!(admitted, rejected, "resolved tick intents");
    Ok(Resolution {
        organisms,
        withdrawals,
    })
}
