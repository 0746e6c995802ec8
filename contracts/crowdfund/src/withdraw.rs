//! # Withdrawal
//!
//! The owner's one-shot release of the escrow after a successful campaign.
//!
//! Order of effects:
//!
//! 1. guards: owner, `Success`
//! 2. commit: `Success -> Closed`, held balance drained, records journaled
//! 3. transfer the drained amount to the owner
//! 4. on transfer failure, restore state, balance and journal, then return
//!    `TransferFailed`

use soroban_sdk::Address;

use crate::campaign::Campaign;
use crate::events::{CampaignEvent, Journal, Withdrawal};
use crate::transfer::FundTransfer;
use crate::types::CampaignState;
use crate::Error;

/// Guards for [`withdraw`]. Returns the amount a withdrawal would release.
pub fn ensure_withdrawable(campaign: &Campaign, actor: &Address) -> Result<i128, Error> {
    campaign.require_owner(actor)?;
    campaign.require_state(CampaignState::Success)?;
    Ok(campaign.ledger.balance())
}

/// Release every escrowed unit to the owner and close the campaign.
///
/// `_now` is unused. It is accepted so that every operation takes the
/// same `(actor, now)` inbound shape.
pub fn withdraw<T: FundTransfer>(
    campaign: &mut Campaign,
    actor: &Address,
    _now: u64,
    transfer: &mut T,
    journal: &mut Journal,
) -> Result<i128, Error> {
    ensure_withdrawable(campaign, actor)?;

    let mark = journal.mark();
    let previous = campaign.state;
    campaign.transition(CampaignState::Closed, journal)?;
    let amount = campaign.ledger.drain();
    journal.push(CampaignEvent::Withdrawal(Withdrawal {
        owner: actor.clone(),
        amount,
    }));

    if transfer.transfer(campaign, actor, amount).is_err() {
        campaign.state = previous;
        campaign.ledger.restore_balance(amount);
        journal.rollback(mark);
        return Err(Error::TransferFailed);
    }

    Ok(amount)
}
