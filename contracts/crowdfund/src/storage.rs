//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! escrow:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key      | Type             | Description                          |
//! |----------|------------------|--------------------------------------|
//! | `Config` | `CampaignConfig` | Immutable campaign configuration     |
//! | `State`  | `CampaignState`  | Current lifecycle state              |
//! | `Totals` | `LedgerTotals`   | Raised, held and contributor count   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type      | Description                       |
//! |-----------------------|-----------|-----------------------------------|
//! | `Contribution(addr)`  | `i128`    | Outstanding entry of one address  |
//! | `Contributor(index)`  | `Address` | N-th distinct contributor         |
//!
//! Every contributor gets their own keys, so `contribute` and `refund`
//! read and write a fixed number of small entries regardless of how many
//! contributors the campaign has. Only the `contributors` query walks the
//! index.
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining. Entries must outlive a failed campaign for as long as
//! contributors may come back for refunds, hence the longer tier.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::campaign::Campaign;
use crate::ledger::{ContributionLedger, LedgerTotals};
use crate::types::{CampaignConfig, CampaignState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable campaign configuration (Instance).
    Config,
    /// Lifecycle state (Instance).
    State,
    /// Ledger totals (Instance).
    Totals,
    /// One contributor's outstanding entry (Persistent).
    Contribution(Address),
    /// Contributor at an index, in order of first contribution (Persistent).
    Contributor(u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Result<CampaignConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn load_state(env: &Env) -> Result<CampaignState, Error> {
    let state = env
        .storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(state)
}

pub fn load_totals(env: &Env) -> Result<LedgerTotals, Error> {
    let totals = env
        .storage()
        .instance()
        .get(&DataKey::Totals)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(totals)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn stored_entry(env: &Env, contributor: &Address) -> Option<i128> {
    let key = DataKey::Contribution(contributor.clone());
    let amount = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(amount)
}

/// Outstanding entry of `contributor`; zero if they never contributed.
pub fn load_contribution(env: &Env, contributor: &Address) -> Result<i128, Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(stored_entry(env, contributor).unwrap_or(0))
}

/// Every distinct contributor, in order of first contribution.
pub fn load_contributors(env: &Env) -> Result<Vec<Address>, Error> {
    let count = load_totals(env)?.contributor_count;
    let mut contributors = Vec::new(env);
    for index in 0..count {
        if let Some(contributor) = env
            .storage()
            .persistent()
            .get(&DataKey::Contributor(index))
        {
            contributors.push_back(contributor);
        }
    }
    Ok(contributors)
}

// ── Aggregate Helpers ────────────────────────────────────────────────

/// Load config, state and totals. No per-contributor entry is loaded.
pub fn load_campaign(env: &Env) -> Result<Campaign, Error> {
    Ok(Campaign::from_parts(
        load_config(env)?,
        load_state(env)?,
        ContributionLedger::from_totals(env, load_totals(env)?),
    ))
}

/// Like [`load_campaign`], with `actor`'s stored entry in the working set.
pub fn load_campaign_for(env: &Env, actor: &Address) -> Result<Campaign, Error> {
    let mut campaign = load_campaign(env)?;
    if let Some(amount) = stored_entry(env, actor) {
        campaign.ledger.load_entry(actor, amount);
    }
    Ok(campaign)
}

/// Write a freshly created campaign, config included.
pub fn save_new_campaign(env: &Env, campaign: &Campaign) {
    env.storage()
        .instance()
        .set(&DataKey::Config, campaign.config());
    save_campaign(env, campaign);
}

/// Write back the mutable parts of the campaign: state, totals and the
/// entries in the ledger's working set. The config is never rewritten
/// after `init`.
pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let ledger = campaign.ledger();
    env.storage()
        .instance()
        .set(&DataKey::State, &campaign.state());
    env.storage()
        .instance()
        .set(&DataKey::Totals, ledger.totals());
    bump_instance(env);

    for (contributor, amount) in ledger.entries().iter() {
        let key = DataKey::Contribution(contributor);
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }

    let first = ledger.first_joined_index();
    for (offset, contributor) in ledger.joined().iter().enumerate() {
        let key = DataKey::Contributor(first + offset as u32);
        env.storage().persistent().set(&key, &contributor);
        bump_persistent(env, &key);
    }
}
