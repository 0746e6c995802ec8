//! # Contribution Ledger
//!
//! Bookkeeping for the escrow: the cumulative amount per contributor, the
//! order in which distinct contributors first appeared, the historical
//! `total_raised` and the live `balance` held by the contract.
//!
//! A ledger is a *working set*. The totals are always complete, while the
//! per-contributor entries hold only what an operation needs: the stored
//! entry of the acting address, plus anything recorded through this ledger.
//! A ledger built with [`ContributionLedger::new`] starts empty and is
//! therefore complete. [`crate::storage`] writes entries back one key each,
//! so an operation touches the same number of entries however many
//! contributors the campaign has.
//!
//! The ledger has no notion of lifecycle state or time. Callers in
//! [`crate::campaign`], [`crate::withdraw`] and [`crate::refund`] decide
//! *whether* a mutation is allowed; this module only guarantees that the
//! numbers stay consistent:
//!
//! - `total_raised == Σ entries` as long as no entry has been refunded.
//! - an address counts as a contributor once, on its first accepted
//!   contribution.
//! - every entry and `balance` stay non-negative.

use soroban_sdk::{contracttype, Address, Env, Map, Vec};

use crate::Error;

/// Running totals, stored as one small entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerTotals {
    pub total_raised: i128,
    pub balance: i128,
    pub contributor_count: u32,
}

impl LedgerTotals {
    pub fn zero() -> Self {
        Self {
            total_raised: 0,
            balance: 0,
            contributor_count: 0,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionLedger {
    totals: LedgerTotals,
    entries: Map<Address, i128>,
    joined: Vec<Address>,
}

impl ContributionLedger {
    pub fn new(env: &Env) -> Self {
        Self::from_totals(env, LedgerTotals::zero())
    }

    /// Working set over stored totals, with no entries loaded yet.
    pub fn from_totals(env: &Env, totals: LedgerTotals) -> Self {
        Self {
            totals,
            entries: Map::new(env),
            joined: Vec::new(env),
        }
    }

    /// Bring a stored entry into the working set.
    pub fn load_entry(&mut self, contributor: &Address, amount: i128) {
        self.entries.set(contributor.clone(), amount);
    }

    /// Add `amount` to `contributor`'s entry and to the running totals.
    ///
    /// Returns the contributor's new cumulative amount. Nothing is written
    /// if any of the checked additions overflow.
    pub fn record(&mut self, contributor: &Address, amount: i128) -> Result<i128, Error> {
        let previous = self.entries.get(contributor.clone());
        let updated = previous
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let total_raised = self
            .totals
            .total_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let balance = self
            .totals
            .balance
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let contributor_count = match previous {
            Some(_) => self.totals.contributor_count,
            None => self
                .totals
                .contributor_count
                .checked_add(1)
                .ok_or(Error::Overflow)?,
        };

        if previous.is_none() {
            self.joined.push_back(contributor.clone());
        }
        self.entries.set(contributor.clone(), updated);
        self.totals = LedgerTotals {
            total_raised,
            balance,
            contributor_count,
        };
        Ok(updated)
    }

    /// Current entry for `contributor`; zero if absent or already refunded.
    pub fn amount_of(&self, contributor: &Address) -> i128 {
        self.entries.get(contributor.clone()).unwrap_or(0)
    }

    /// Zero `contributor`'s entry and release it from the held balance.
    ///
    /// Returns the amount that was recorded. `total_raised` is left as is.
    pub fn take_entry(&mut self, contributor: &Address) -> i128 {
        let amount = self.amount_of(contributor);
        if amount > 0 {
            self.entries.set(contributor.clone(), 0);
            self.totals.balance -= amount;
        }
        amount
    }

    /// Undo a [`take_entry`](Self::take_entry) whose transfer failed.
    pub fn restore_entry(&mut self, contributor: &Address, amount: i128) {
        self.entries.set(contributor.clone(), amount);
        self.totals.balance += amount;
    }

    /// Release the whole held balance. Returns the released amount.
    pub fn drain(&mut self) -> i128 {
        let amount = self.totals.balance;
        self.totals.balance = 0;
        amount
    }

    /// Undo a [`drain`](Self::drain) whose transfer failed.
    pub fn restore_balance(&mut self, amount: i128) {
        self.totals.balance = amount;
    }

    pub fn totals(&self) -> &LedgerTotals {
        &self.totals
    }

    pub fn total_raised(&self) -> i128 {
        self.totals.total_raised
    }

    pub fn balance(&self) -> i128 {
        self.totals.balance
    }

    pub fn contributor_count(&self) -> u32 {
        self.totals.contributor_count
    }

    /// Entries in the working set.
    pub fn entries(&self) -> Map<Address, i128> {
        self.entries.clone()
    }

    /// Contributors first recorded through this working set, in order.
    pub fn joined(&self) -> Vec<Address> {
        self.joined.clone()
    }

    /// Contributor index of the first address in [`joined`](Self::joined).
    pub fn first_joined_index(&self) -> u32 {
        self.totals.contributor_count - self.joined.len()
    }
}
