// Copyright 2021 Parallel Finance Developer.
// This file is part of Parallel Finance.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Position ledger: per account balances and the market sets derived from them.
//!
//! Callers validate first, these helpers only keep the bookkeeping consistent.

use super::*;

use sp_runtime::ArithmeticError;

impl<T: Config> Pallet<T> {
    /// Markets where `who` has a non-zero supply counted as collateral.
    pub fn collateral_markets(who: &T::AccountId) -> impl Iterator<Item = MarketId<T>> {
        AccountCollateralMarkets::<T>::iter_key_prefix(who)
    }

    /// Markets where `who` has a non-zero borrow.
    pub fn borrow_markets(who: &T::AccountId) -> impl Iterator<Item = MarketId<T>> {
        AccountBorrowMarkets::<T>::iter_key_prefix(who)
    }

    pub(crate) fn record_supply(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        market: &Market<T>,
        amount: Balance,
    ) -> DispatchResult {
        AccountSupplies::<T>::try_mutate(market_id, who, |supplied| -> DispatchResult {
            *supplied = supplied
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;
            Ok(())
        })?;
        if market.is_collateral() {
            AccountCollateralMarkets::<T>::insert(who, market_id, ());
        }
        Self::touch(who);
        Ok(())
    }

    pub(crate) fn record_withdraw(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        let remaining = Self::decrease(AccountSupplies::<T>::get(market_id, who), amount)?;
        if remaining.is_zero() {
            AccountSupplies::<T>::remove(market_id, who);
            AccountCollateralMarkets::<T>::remove(who, market_id);
        } else {
            AccountSupplies::<T>::insert(market_id, who, remaining);
        }
        Self::touch(who);
        Ok(())
    }

    pub(crate) fn record_borrow(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        AccountBorrows::<T>::try_mutate(market_id, who, |borrowed| -> DispatchResult {
            *borrowed = borrowed
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;
            Ok(())
        })?;
        AccountBorrowMarkets::<T>::insert(who, market_id, ());
        Self::touch(who);
        Ok(())
    }

    pub(crate) fn record_repay(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        let remaining = Self::decrease(AccountBorrows::<T>::get(market_id, who), amount)?;
        if remaining.is_zero() {
            AccountBorrows::<T>::remove(market_id, who);
            AccountBorrowMarkets::<T>::remove(who, market_id);
        } else {
            AccountBorrows::<T>::insert(market_id, who, remaining);
        }
        Self::touch(who);
        Ok(())
    }

    /// Zeroes every balance referenced by the account's market sets and empties both sets.
    pub(crate) fn clear_all_positions(who: &T::AccountId) {
        let collateral_markets: Vec<_> = Self::collateral_markets(who).collect();
        for market_id in collateral_markets {
            AccountSupplies::<T>::remove(market_id, who);
            AccountCollateralMarkets::<T>::remove(who, market_id);
        }
        let borrow_markets: Vec<_> = Self::borrow_markets(who).collect();
        for market_id in borrow_markets {
            AccountBorrows::<T>::remove(market_id, who);
            AccountBorrowMarkets::<T>::remove(who, market_id);
        }
        Self::touch(who);
    }

    fn decrease(balance: Balance, amount: Balance) -> Result<Balance, DispatchError> {
        Ok(balance
            .checked_sub(amount)
            .ok_or(ArithmeticError::Underflow)?)
    }

    fn touch(who: &T::AccountId) {
        AccountLastUpdate::<T>::insert(who, T::UnixTime::now().as_secs());
    }
}
