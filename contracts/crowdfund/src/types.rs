//! # Types
//!
//! Shared data structures used across all modules of the crowdfund escrow.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A campaign is internally stored as separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at `init`; never mutated.
//! - [`CampaignState`] — written on every lifecycle transition.
//! - [`ContributionLedger`](crate::ledger::ContributionLedger) — written on
//!   every contribution, withdrawal and refund.
//!
//! The public API exposes the reconstructed [`CampaignInfo`] snapshot for
//! convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`CampaignState`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Preparing ──► Active ──► Success ──► Closed
//!                  └─────► Failed
//! ```
//!
//! `Failed` is terminal for the refund path: refunds drain individual
//! ledger entries and never move the campaign itself. `Refunded` is part of
//! the state vocabulary but no edge leads into it.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle state of the campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignState {
    /// Created, not yet accepting contributions.
    Preparing,
    /// Accepting contributions until the deadline.
    Active,
    /// Goal met at the deadline; owner may withdraw.
    Success,
    /// Goal missed at the deadline; contributors may pull refunds.
    Failed,
    /// Owner withdrew the raised funds.
    Closed,
    /// Reserved. Refunds are tracked per contributor, not as a campaign state.
    Refunded,
}

impl CampaignState {
    /// Return `true` if `self -> next` is an edge of the lifecycle graph.
    pub fn can_transition_to(self, next: CampaignState) -> bool {
        matches!(
            (self, next),
            (CampaignState::Preparing, CampaignState::Active)
                | (CampaignState::Active, CampaignState::Success)
                | (CampaignState::Active, CampaignState::Failed)
                | (CampaignState::Success, CampaignState::Closed)
        )
    }
}

/// Immutable campaign configuration, written once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Address allowed to start the campaign and withdraw on success.
    pub owner: Address,
    /// Token contract holding the escrowed funds.
    pub token: Address,
    /// Human-readable campaign name; never empty.
    pub name: String,
    /// Target amount; always positive.
    pub goal: i128,
    /// Ledger timestamp at which contributions stop and finalization opens.
    pub deadline: u64,
}

/// Full view of the campaign returned by queries.
///
/// Reconstructed from the split config / state / ledger entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignInfo {
    pub owner: Address,
    pub token: Address,
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
    pub state: CampaignState,
    /// Historical amount raised; refunds never lower it.
    pub total_raised: i128,
    /// Funds currently held in escrow.
    pub balance: i128,
    pub contributor_count: u32,
    pub progress_percent: u32,
}
