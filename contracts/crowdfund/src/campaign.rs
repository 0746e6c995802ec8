//! # Campaign State Machine
//!
//! [`Campaign`] is the single owned aggregate of the escrow: immutable
//! [`CampaignConfig`], the current [`CampaignState`] and the
//! [`ContributionLedger`]. Every operation takes it by exclusive reference,
//! along with the caller identity and the current ledger timestamp, and
//! either applies all of its effects or returns an [`Error`] with the
//! aggregate untouched.
//!
//! Fund-releasing operations live in [`crate::withdraw`] and
//! [`crate::refund`]; the outcome decision lives in [`crate::finalize`].

use soroban_sdk::{Address, Env, String};

use crate::events::{CampaignCreated, CampaignEvent, Contribution, Journal, StateChanged};
use crate::ledger::ContributionLedger;
use crate::types::{CampaignConfig, CampaignInfo, CampaignState};
use crate::Error;

/// Longest campaign that can be created.
pub const MAX_DURATION_DAYS: u32 = 90;

pub const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub(crate) config: CampaignConfig,
    pub(crate) state: CampaignState,
    pub(crate) ledger: ContributionLedger,
}

impl Campaign {
    /// Validate parameters and build a new campaign in `Preparing`.
    ///
    /// `escrow` is the address holding the funds. It can never be the owner,
    /// since a withdrawal to it would strand the funds.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        env: &Env,
        escrow: &Address,
        owner: Address,
        token: Address,
        name: String,
        goal: i128,
        duration_days: u32,
        now: u64,
    ) -> Result<Self, Error> {
        if owner == *escrow {
            return Err(Error::InvalidOwner);
        }
        if name.len() == 0 {
            return Err(Error::InvalidName);
        }
        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if duration_days == 0 || duration_days > MAX_DURATION_DAYS {
            return Err(Error::InvalidDuration);
        }
        let deadline = now
            .checked_add(u64::from(duration_days) * SECONDS_PER_DAY)
            .ok_or(Error::Overflow)?;

        Ok(Self {
            config: CampaignConfig {
                owner,
                token,
                name,
                goal,
                deadline,
            },
            state: CampaignState::Preparing,
            ledger: ContributionLedger::new(env),
        })
    }

    /// Reassemble a stored campaign.
    pub fn from_parts(
        config: CampaignConfig,
        state: CampaignState,
        ledger: ContributionLedger,
    ) -> Self {
        Self {
            config,
            state,
            ledger,
        }
    }

    /// Record describing the freshly created campaign.
    pub fn created_event(&self) -> CampaignEvent {
        CampaignEvent::Created(CampaignCreated {
            owner: self.config.owner.clone(),
            token: self.config.token.clone(),
            name: self.config.name.clone(),
            goal: self.config.goal,
            deadline: self.config.deadline,
        })
    }

    /// Open the campaign for contributions.
    pub fn start(&mut self, actor: &Address, now: u64, journal: &mut Journal) -> Result<(), Error> {
        self.require_owner(actor)?;
        self.require_state(CampaignState::Preparing)?;
        if now >= self.config.deadline {
            return Err(Error::Expired);
        }
        self.transition(CampaignState::Active, journal)
    }

    /// Accept `amount` from `actor`.
    ///
    /// The deadline is checked before the state so that a late contribution
    /// is always reported as `Expired`.
    pub fn contribute(
        &mut self,
        actor: &Address,
        amount: i128,
        now: u64,
        journal: &mut Journal,
    ) -> Result<i128, Error> {
        if now >= self.config.deadline {
            return Err(Error::Expired);
        }
        self.require_state(CampaignState::Active)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let cumulative = self.ledger.record(actor, amount)?;
        journal.push(CampaignEvent::Contribution(Contribution {
            contributor: actor.clone(),
            amount,
        }));
        Ok(cumulative)
    }

    /// Move along one edge of the lifecycle graph and journal it.
    pub(crate) fn transition(
        &mut self,
        next: CampaignState,
        journal: &mut Journal,
    ) -> Result<(), Error> {
        if !self.state.can_transition_to(next) {
            return Err(Error::InvalidState);
        }
        let old = self.state;
        self.state = next;
        journal.push(CampaignEvent::StateChanged(StateChanged { old, new: next }));
        Ok(())
    }

    pub(crate) fn require_owner(&self, actor: &Address) -> Result<(), Error> {
        if *actor != self.config.owner {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub(crate) fn require_state(&self, expected: CampaignState) -> Result<(), Error> {
        if self.state != expected {
            return Err(Error::InvalidState);
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CampaignState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CampaignState::Active
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    pub fn ledger(&self) -> &ContributionLedger {
        &self.ledger
    }

    pub fn total_raised(&self) -> i128 {
        self.ledger.total_raised()
    }

    /// Funding progress in whole percent, truncated and capped at 100.
    pub fn progress_percent(&self) -> u32 {
        progress_percent(self.ledger.total_raised(), self.config.goal)
    }

    pub fn contributor_count(&self) -> u32 {
        self.ledger.contributor_count()
    }

    pub fn info(&self) -> CampaignInfo {
        CampaignInfo {
            owner: self.config.owner.clone(),
            token: self.config.token.clone(),
            name: self.config.name.clone(),
            goal: self.config.goal,
            deadline: self.config.deadline,
            state: self.state,
            total_raised: self.ledger.total_raised(),
            balance: self.ledger.balance(),
            contributor_count: self.ledger.contributor_count(),
            progress_percent: self.progress_percent(),
        }
    }
}

/// `min(100, raised * 100 / goal)` with integer division; `0` for a
/// non-positive goal.
pub fn progress_percent(total_raised: i128, goal: i128) -> u32 {
    if goal <= 0 || total_raised <= 0 {
        return 0;
    }
    if total_raised >= goal {
        return 100;
    }
    if let Some(scaled) = total_raised.checked_mul(100) {
        return (scaled / goal) as u32;
    }
    // Two decimal digits of long division; every partial sum stays below 2 * goal.
    let goal = goal as u128;
    let (tens, rest) = next_digit(total_raised as u128, goal);
    let (units, _) = next_digit(rest, goal);
    tens * 10 + units
}

/// `(floor(10 * r / goal), 10 * r mod goal)` for `r < goal`, without overflow.
fn next_digit(r: u128, goal: u128) -> (u32, u128) {
    let mut acc = 0u128;
    let mut digit = 0;
    for _ in 0..10 {
        acc += r;
        if acc >= goal {
            acc -= goal;
            digit += 1;
        }
    }
    (digit, acc)
}
