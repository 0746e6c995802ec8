#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::campaign::Campaign;
use crate::ledger::ContributionLedger;
use crate::types::{CampaignInfo, CampaignState};

/// INV-1: Campaign goal must always be positive.
pub fn assert_goal_positive(info: &CampaignInfo) {
    assert!(
        info.goal > 0,
        "INV-1 violated: non-positive goal ({})",
        info.goal
    );
}

/// INV-2: Progress never exceeds 100 and is 0 while nothing was raised.
pub fn assert_progress_bounded(info: &CampaignInfo) {
    assert!(
        info.progress_percent <= 100,
        "INV-2 violated: progress {} > 100",
        info.progress_percent
    );
    if info.total_raised == 0 {
        assert_eq!(
            info.progress_percent, 0,
            "INV-2 violated: progress {} with nothing raised",
            info.progress_percent
        );
    }
}

/// INV-3: Held balance is never negative and never exceeds what was raised.
pub fn assert_balance_bounded(info: &CampaignInfo) {
    assert!(
        info.balance >= 0 && info.balance <= info.total_raised,
        "INV-3 violated: balance {} outside [0, {}]",
        info.balance,
        info.total_raised
    );
}

/// INV-4: Once the owner has withdrawn, nothing is left in escrow.
pub fn assert_closed_is_drained(info: &CampaignInfo) {
    if info.state == CampaignState::Closed {
        assert_eq!(
            info.balance, 0,
            "INV-4 violated: closed campaign still holds {}",
            info.balance
        );
    }
}

/// INV-5: Contributors are distinct, their entries non-negative, and the
/// held balance equals the sum of outstanding entries (before withdrawal).
/// Needs a complete ledger, one built from scratch in memory.
pub fn assert_ledger_consistent(ledger: &ContributionLedger, state: CampaignState) {
    let contributors = ledger.joined();
    assert_eq!(
        contributors.len(),
        ledger.contributor_count(),
        "INV-5 violated: contributor count {} for {} contributors",
        ledger.contributor_count(),
        contributors.len()
    );
    let mut outstanding = 0i128;
    for (i, contributor) in contributors.iter().enumerate() {
        for other in contributors.iter().skip(i + 1) {
            assert_ne!(contributor, other, "INV-5 violated: duplicate contributor");
        }
        let amount = ledger.amount_of(&contributor);
        assert!(amount >= 0, "INV-5 violated: negative entry {}", amount);
        outstanding += amount;
    }
    if state != CampaignState::Closed {
        assert_eq!(
            outstanding,
            ledger.balance(),
            "INV-5 violated: entries sum to {} but balance is {}",
            outstanding,
            ledger.balance()
        );
    }
}

/// INV-6: Only lifecycle edges are ever taken.
pub fn assert_valid_state_transition(from: CampaignState, to: CampaignState) {
    assert!(
        from == to || from.can_transition_to(to),
        "INV-6 violated: invalid transition from {:?} to {:?}",
        from,
        to
    );
}

/// INV-7: Fields fixed at creation never change.
pub fn assert_immutable_fields(original: &CampaignInfo, current: &CampaignInfo) {
    assert_eq!(original.owner, current.owner, "INV-7 violated: owner changed");
    assert_eq!(original.token, current.token, "INV-7 violated: token changed");
    assert_eq!(original.name, current.name, "INV-7 violated: name changed");
    assert_eq!(original.goal, current.goal, "INV-7 violated: goal changed");
    assert_eq!(
        original.deadline, current.deadline,
        "INV-7 violated: deadline changed"
    );
}

/// INV-8: total_raised never decreases.
pub fn assert_total_raised_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "INV-8 violated: total_raised decreased from {} to {}",
        before,
        after
    );
}

/// INV-9: A refunded contributor's entry is zero.
pub fn assert_refunded_entry_zero(ledger: &ContributionLedger, contributor: &Address) {
    assert_eq!(
        ledger.amount_of(contributor),
        0,
        "INV-9 violated: refunded contributor still has an entry"
    );
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(info: &CampaignInfo) {
    assert_goal_positive(info);
    assert_progress_bounded(info);
    assert_balance_bounded(info);
    assert_closed_is_drained(info);
}

/// Run every invariant that needs the whole aggregate.
pub fn assert_aggregate_invariants(campaign: &Campaign) {
    assert_all_campaign_invariants(&campaign.info());
    assert_ledger_consistent(campaign.ledger(), campaign.state());
}
