//! # Fund Transfer
//!
//! The outbound capability used by [`crate::withdraw`] and [`crate::refund`].
//!
//! A transfer is handed the campaign as it stands *after* the releasing
//! operation committed its mutation. Anything the recipient runs in response
//! to the payment therefore sees the campaign already `Closed`, or the
//! refunded entry already zero, and is turned away by the ordinary guards.
//!
//! [`TokenTransfer`] writes that committed campaign to contract storage
//! before calling the token. If the token call fails the entry point
//! returns `TransferFailed` and the host discards those writes.

use soroban_sdk::{log, token, Address, Env};

use crate::campaign::Campaign;
use crate::storage;
use crate::Error;

pub trait FundTransfer {
    /// Move `amount` of the escrowed asset to `to`.
    ///
    /// Any `Err` is reported to the caller as `Error::TransferFailed`.
    fn transfer(&mut self, campaign: &Campaign, to: &Address, amount: i128) -> Result<(), Error>;
}

/// [`FundTransfer`] backed by a Soroban token contract. Persists the
/// committed campaign, then pays out of the escrow.
pub struct TokenTransfer<'a> {
    env: &'a Env,
    escrow: Address,
    token: token::Client<'a>,
}

impl<'a> TokenTransfer<'a> {
    pub fn new(env: &'a Env, escrow: Address, asset: &Address) -> Self {
        Self {
            env,
            escrow,
            token: token::Client::new(env, asset),
        }
    }
}

impl FundTransfer for TokenTransfer<'_> {
    fn transfer(&mut self, campaign: &Campaign, to: &Address, amount: i128) -> Result<(), Error> {
        storage::save_campaign(self.env, campaign);
        match self.token.try_transfer(&self.escrow, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "token transfer failed", to.clone(), amount);
                Err(Error::TransferFailed)
            }
        }
    }
}
