//! In-memory balance sheet over the `TOKENS` table.
//!
//! Every balance mutation goes through a [`BalanceSheet`]: debits and
//! credits are applied to cached copies, and nothing reaches storage until
//! [`BalanceSheet::commit`]. A failing debit therefore leaves the table
//! untouched no matter how many entries were already modified.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use shared::AssetInfo;

use crate::error::ContractError;
use crate::state::{load_balance, TOKENS};

#[derive(Debug, Default)]
pub struct BalanceSheet {
    entries: BTreeMap<(String, Addr), Uint128>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(
        &mut self,
        storage: &dyn Storage,
        asset: &AssetInfo,
        user: &Addr,
    ) -> StdResult<&mut Uint128> {
        match self.entries.entry((asset.storage_key(), user.clone())) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let current = load_balance(storage, asset, user)?;
                Ok(e.insert(current))
            }
        }
    }

    /// Current (uncommitted) balance
    pub fn balance(
        &mut self,
        storage: &dyn Storage,
        asset: &AssetInfo,
        user: &Addr,
    ) -> StdResult<Uint128> {
        self.entry(storage, asset, user).map(|balance| *balance)
    }

    /// Add `amount`, returning the new balance
    pub fn credit(
        &mut self,
        storage: &dyn Storage,
        asset: &AssetInfo,
        user: &Addr,
        amount: Uint128,
    ) -> Result<Uint128, ContractError> {
        let balance = self.entry(storage, asset, user)?;
        *balance = balance.checked_add(amount)?;
        Ok(*balance)
    }

    /// Subtract `amount`, returning the new balance.
    /// Fails with `InsufficientBalance` and leaves the entry unchanged.
    pub fn debit(
        &mut self,
        storage: &dyn Storage,
        asset: &AssetInfo,
        user: &Addr,
        amount: Uint128,
    ) -> Result<Uint128, ContractError> {
        let balance = self.entry(storage, asset, user)?;
        if *balance < amount {
            return Err(ContractError::InsufficientBalance {});
        }
        *balance -= amount;
        Ok(*balance)
    }

    /// Write every touched balance back to storage
    pub fn commit(self, storage: &mut dyn Storage) -> StdResult<()> {
        for ((asset_key, user), amount) in self.entries {
            TOKENS.save(storage, (asset_key.as_str(), &user), &amount)?;
        }
        Ok(())
    }
}
