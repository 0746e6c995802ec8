//! # Crowdfund Escrow Contract
//!
//! A single crowdfunding campaign run as a deterministic escrow. One
//! deployment of the `Crowdfund` contract governs exactly one campaign:
//!
//! | Phase        | Entry Point(s)                                  |
//! |--------------|-------------------------------------------------|
//! | Bootstrap    | [`Crowdfund::init`]                             |
//! | Opening      | [`Crowdfund::start`]                            |
//! | Funding      | [`Crowdfund::contribute`]                       |
//! | Outcome      | [`Crowdfund::finalize`]                         |
//! | Disbursement | [`Crowdfund::withdraw`] or [`Crowdfund::refund`] |
//! | Queries      | `get_campaign`, `state`, `total_raised`, `progress_percent`, ... |
//!
//! ## Architecture
//!
//! The campaign aggregate and its rules live in [`campaign`], [`ledger`],
//! [`finalize`], [`withdraw`] and [`refund`]. They take the caller identity
//! and the ledger timestamp as plain arguments and never touch storage.
//! Storage access is fully delegated to [`storage`]. This file contains
//! **only** the entry points: authenticate, load, run the core operation,
//! save, publish events.
//!
//! Fund-releasing operations commit their state change before the token
//! transfer runs, and undo it if the transfer fails.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, token, Address, Env, String, Vec,
};

pub mod campaign;
pub mod events;
pub mod finalize;
pub mod ledger;
pub mod refund;
mod storage;
pub mod transfer;
mod types;
pub mod withdraw;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use campaign::Campaign;
use events::Journal;
use transfer::TokenTransfer;
pub use types::{CampaignConfig, CampaignInfo, CampaignState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidOwner = 1,
    InvalidName = 2,
    InvalidGoal = 3,
    InvalidDuration = 4,
    Unauthorized = 5,
    InvalidState = 6,
    Expired = 7,
    NotYetExpired = 8,
    InvalidAmount = 9,
    NothingToRefund = 10,
    TransferFailed = 11,
    AlreadyInitialized = 12,
    NotInitialized = 13,
    Overflow = 14,
}

#[contract]
pub struct Crowdfund;

#[contractimpl]
impl Crowdfund {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Create the campaign in `Preparing`.
    ///
    /// Must be called exactly once immediately after deployment.
    /// `deadline = now + duration_days * 86_400`, `0 < duration_days <= 90`.
    ///
    /// - `owner` must sign the transaction (checked after parameter validation).
    /// - `token` is the asset contributions are made in.
    pub fn init(
        env: Env,
        owner: Address,
        token: Address,
        name: String,
        goal: i128,
        duration_days: u32,
    ) -> Result<CampaignInfo, Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let campaign = Campaign::create(
            &env,
            &env.current_contract_address(),
            owner.clone(),
            token,
            name,
            goal,
            duration_days,
            env.ledger().timestamp(),
        )?;
        owner.require_auth();
        storage::save_new_campaign(&env, &campaign);

        let mut journal = Journal::new(&env);
        journal.push(campaign.created_event());
        journal.publish(&env);
        Ok(campaign.info())
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Open the campaign for contributions. Owner only, from `Preparing`,
    /// before the deadline.
    pub fn start(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut campaign = storage::load_campaign(&env)?;
        let mut journal = Journal::new(&env);

        campaign.start(&caller, env.ledger().timestamp(), &mut journal)?;

        storage::save_campaign(&env, &campaign);
        journal.publish(&env);
        Ok(())
    }

    /// Contribute `amount` of the campaign token.
    ///
    /// Returns the contributor's cumulative contribution. The tokens are
    /// pulled from `contributor` into the escrow.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<i128, Error> {
        contributor.require_auth();
        let mut campaign = storage::load_campaign_for(&env, &contributor)?;
        let mut journal = Journal::new(&env);

        let cumulative =
            campaign.contribute(&contributor, amount, env.ledger().timestamp(), &mut journal)?;
        storage::save_campaign(&env, &campaign);

        let token_client = token::Client::new(&env, &campaign.config().token);
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        journal.publish(&env);
        Ok(cumulative)
    }

    /// Decide `Success` or `Failed` once the deadline has passed.
    ///
    /// Callable by anyone. Fails with `InvalidState` once already decided.
    pub fn finalize(env: Env) -> Result<CampaignState, Error> {
        let mut campaign = storage::load_campaign(&env)?;
        let mut journal = Journal::new(&env);

        let outcome = finalize::finalize(&mut campaign, env.ledger().timestamp(), &mut journal)?;
        log!(&env, "campaign finalized", campaign.total_raised(), outcome);

        storage::save_campaign(&env, &campaign);
        journal.publish(&env);
        Ok(outcome)
    }

    /// Release the escrow to the owner after a successful campaign.
    ///
    /// Returns the amount transferred. The campaign is `Closed` afterwards.
    /// [`TokenTransfer`] saves the campaign before paying out.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let mut campaign = storage::load_campaign(&env)?;
        let mut journal = Journal::new(&env);
        let mut transfer = TokenTransfer::new(
            &env,
            env.current_contract_address(),
            &campaign.config().token,
        );

        let amount = withdraw::withdraw(
            &mut campaign,
            &caller,
            env.ledger().timestamp(),
            &mut transfer,
            &mut journal,
        )?;

        journal.publish(&env);
        Ok(amount)
    }

    /// Return the caller's whole contribution after a failed campaign.
    pub fn refund(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let mut campaign = storage::load_campaign_for(&env, &contributor)?;
        let mut journal = Journal::new(&env);
        let mut transfer = TokenTransfer::new(
            &env,
            env.current_contract_address(),
            &campaign.config().token,
        );

        let amount = refund::refund(
            &mut campaign,
            &contributor,
            env.ledger().timestamp(),
            &mut transfer,
            &mut journal,
        )?;

        journal.publish(&env);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full snapshot of the campaign.
    pub fn get_campaign(env: Env) -> Result<CampaignInfo, Error> {
        Ok(storage::load_campaign(&env)?.info())
    }

    /// Current lifecycle state.
    pub fn state(env: Env) -> Result<CampaignState, Error> {
        storage::load_state(&env)
    }

    /// Whether contributions are being accepted.
    pub fn is_active(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)? == CampaignState::Active)
    }

    /// Historical amount raised. Refunds do not lower it.
    pub fn total_raised(env: Env) -> Result<i128, Error> {
        Ok(storage::load_totals(&env)?.total_raised)
    }

    /// Funds currently held in escrow.
    pub fn balance(env: Env) -> Result<i128, Error> {
        Ok(storage::load_totals(&env)?.balance)
    }

    /// `total_raised` as a whole percentage of the goal, capped at 100.
    pub fn progress_percent(env: Env) -> Result<u32, Error> {
        Ok(storage::load_campaign(&env)?.progress_percent())
    }

    /// Number of distinct contributors.
    pub fn contributor_count(env: Env) -> Result<u32, Error> {
        Ok(storage::load_totals(&env)?.contributor_count)
    }

    /// Distinct contributors in order of their first contribution.
    pub fn contributors(env: Env) -> Result<Vec<Address>, Error> {
        storage::load_contributors(&env)
    }

    /// Outstanding contribution of `contributor`; zero once refunded.
    pub fn contribution_of(env: Env, contributor: Address) -> Result<i128, Error> {
        storage::load_contribution(&env, &contributor)
    }

    /// Campaign owner.
    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(storage::load_config(&env)?.owner)
    }

    /// Token contributions are made in.
    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(storage::load_config(&env)?.token)
    }

    /// Campaign name.
    pub fn name(env: Env) -> Result<String, Error> {
        Ok(storage::load_config(&env)?.name)
    }

    /// Funding goal.
    pub fn goal(env: Env) -> Result<i128, Error> {
        Ok(storage::load_config(&env)?.goal)
    }

    /// Ledger timestamp at which the campaign stops accepting contributions.
    pub fn deadline(env: Env) -> Result<u64, Error> {
        Ok(storage::load_config(&env)?.deadline)
    }
}
