//! # Finalization
//!
//! Decides the outcome of an `Active` campaign once its deadline has passed.
//! Anyone may call it; the outcome depends only on `total_raised`, `goal`
//! and the clock.

use crate::campaign::Campaign;
use crate::events::Journal;
use crate::types::CampaignState;
use crate::Error;

/// Outcome for a campaign that raised `total_raised` against `goal`.
///
/// Exactly meeting the goal succeeds.
pub fn decide(total_raised: i128, goal: i128) -> CampaignState {
    if total_raised >= goal {
        CampaignState::Success
    } else {
        CampaignState::Failed
    }
}

/// Move an expired `Active` campaign to `Success` or `Failed`.
///
/// A second call fails with `InvalidState`; callers treat that as "already
/// finalized", not as a fault.
pub fn finalize(campaign: &mut Campaign, now: u64, journal: &mut Journal) -> Result<CampaignState, Error> {
    campaign.require_state(CampaignState::Active)?;
    if now < campaign.config.deadline {
        return Err(Error::NotYetExpired);
    }

    let outcome = decide(campaign.ledger.total_raised(), campaign.config.goal);
    campaign.transition(outcome, journal)?;
    Ok(outcome)
}
