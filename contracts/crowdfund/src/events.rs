//! # Events
//!
//! Typed payloads for every record the escrow emits, plus the [`Journal`]
//! that buffers them while an operation runs.
//!
//! | Topic                    | Payload             |
//! |--------------------------|---------------------|
//! | `("created",)`           | [`CampaignCreated`] |
//! | `("state",)`             | [`StateChanged`]    |
//! | `("contrib", contributor)` | [`Contribution`]  |
//! | `("withdraw", owner)`    | [`Withdrawal`]      |
//! | `("refund", contributor)` | [`Refund`]         |
//!
//! Core operations append to a journal instead of publishing directly. If
//! an outbound transfer fails the journal is rolled back to the mark taken
//! on entry, so an event for a reverted mutation is never published.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Vec};

use crate::types::CampaignState;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub owner: Address,
    pub token: Address,
    pub name: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChanged {
    pub old: CampaignState,
    pub new: CampaignState,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refund {
    pub contributor: Address,
    pub amount: i128,
}

/// Any record the campaign can emit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CampaignEvent {
    Created(CampaignCreated),
    StateChanged(StateChanged),
    Contribution(Contribution),
    Withdrawal(Withdrawal),
    Refund(Refund),
}

/// Append-only buffer of records produced by one operation.
#[derive(Clone, Debug)]
pub struct Journal {
    records: Vec<CampaignEvent>,
}

impl Journal {
    pub fn new(env: &Env) -> Self {
        Self {
            records: Vec::new(env),
        }
    }

    pub fn push(&mut self, event: CampaignEvent) {
        self.records.push_back(event);
    }

    /// Position to roll back to if the operation fails later on.
    pub fn mark(&self) -> u32 {
        self.records.len()
    }

    /// Drop every record appended after `mark`.
    pub fn rollback(&mut self, mark: u32) {
        while self.records.len() > mark {
            self.records.pop_back();
        }
    }

    pub fn len(&self) -> u32 {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> Vec<CampaignEvent> {
        self.records.clone()
    }

    /// Publish all buffered records as contract events, in order.
    pub fn publish(self, env: &Env) {
        for event in self.records.iter() {
            match event {
                CampaignEvent::Created(data) => emit_campaign_created(env, data),
                CampaignEvent::StateChanged(data) => emit_state_changed(env, data),
                CampaignEvent::Contribution(data) => emit_contribution(env, data),
                CampaignEvent::Withdrawal(data) => emit_withdrawal(env, data),
                CampaignEvent::Refund(data) => emit_refund(env, data),
            }
        }
    }
}

pub fn emit_campaign_created(env: &Env, data: CampaignCreated) {
    let topics = (symbol_short!("created"),);
    env.events().publish(topics, data);
}

pub fn emit_state_changed(env: &Env, data: StateChanged) {
    let topics = (symbol_short!("state"),);
    env.events().publish(topics, data);
}

pub fn emit_contribution(env: &Env, data: Contribution) {
    let topics = (symbol_short!("contrib"), data.contributor.clone());
    env.events().publish(topics, data);
}

pub fn emit_withdrawal(env: &Env, data: Withdrawal) {
    let topics = (symbol_short!("withdraw"), data.owner.clone());
    env.events().publish(topics, data);
}

pub fn emit_refund(env: &Env, data: Refund) {
    let topics = (symbol_short!("refund"), data.contributor.clone());
    env.events().publish(topics, data);
}
