//! # Refunds
//!
//! Pull refunds for a `Failed` campaign. Each contributor reclaims their own
//! entry, independently of everyone else; the campaign stays `Failed`.
//!
//! The entry is zeroed before the transfer runs, so a second call from the
//! same address (re-entrant or not) finds nothing to refund. A failed
//! transfer puts the entry back.

use soroban_sdk::Address;

use crate::campaign::Campaign;
use crate::events::{CampaignEvent, Journal, Refund};
use crate::transfer::FundTransfer;
use crate::types::CampaignState;
use crate::Error;

/// Guards for [`refund`]. Returns the amount `actor` would get back.
pub fn ensure_refundable(campaign: &Campaign, actor: &Address) -> Result<i128, Error> {
    campaign.require_state(CampaignState::Failed)?;
    let amount = campaign.ledger.amount_of(actor);
    if amount <= 0 {
        return Err(Error::NothingToRefund);
    }
    Ok(amount)
}

/// Return `actor`'s whole contribution to them.
///
/// `_now` is unused. It is accepted so that every operation takes the
/// same `(actor, now)` inbound shape.
pub fn refund<T: FundTransfer>(
    campaign: &mut Campaign,
    actor: &Address,
    _now: u64,
    transfer: &mut T,
    journal: &mut Journal,
) -> Result<i128, Error> {
    ensure_refundable(campaign, actor)?;

    let mark = journal.mark();
    let amount = campaign.ledger.take_entry(actor);
    journal.push(CampaignEvent::Refund(Refund {
        contributor: actor.clone(),
        amount,
    }));

    if transfer.transfer(campaign, actor, amount).is_err() {
        campaign.ledger.restore_entry(actor, amount);
        journal.rollback(mark);
        return Err(Error::TransferFailed);
    }

    Ok(amount)
}
