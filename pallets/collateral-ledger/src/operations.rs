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

//! Balance mutating operations. Each one runs every check before its first transfer
//! or storage write.

use super::*;

use sp_runtime::ArithmeticError;
use sp_std::collections::btree_map::{BTreeMap, Entry};

impl<T: Config> Pallet<T> {
    pub(crate) fn do_supply(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
        let mut market = Self::ensure_active_market(market_id)?;
        let total_supply = market
            .total_supply
            .checked_add(amount)
            .ok_or(ArithmeticError::Overflow)?;
        ensure!(
            total_supply <= market.supply_cap,
            Error::<T>::SupplyCapExceeded
        );

        T::Assets::transfer(market.asset, who, &Self::account_id(), amount, false)?;
        Self::record_supply(who, market_id, &market, amount)?;
        market.total_supply = total_supply;
        Markets::<T>::insert(market_id, market);

        Ok(())
    }

    pub(crate) fn do_withdraw(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
        let mut market = Self::ensure_active_market(market_id)?;
        ensure!(
            Self::account_supplies(market_id, who) >= amount,
            Error::<T>::InsufficientDeposit
        );
        let total_supply = market
            .total_supply
            .checked_sub(amount)
            .ok_or(ArithmeticError::Underflow)?;
        ensure!(
            total_supply >= market.total_borrowed,
            Error::<T>::InsufficientLiquidity
        );
        // Supplies that aren't collateral don't back any debt. Checking the health factor
        // here would lock them for good and break supply/withdraw conservation.
        if market.is_collateral() {
            let withdraw_value = market.value_of(amount)?;
            ensure!(
                Self::health_factor(who, withdraw_value, Zero::zero())? > 0,
                Error::<T>::InsufficientCollateral
            );
        }

        T::Assets::transfer(market.asset, &Self::account_id(), who, amount, false)?;
        Self::record_withdraw(who, market_id, amount)?;
        market.total_supply = total_supply;
        Markets::<T>::insert(market_id, market);

        Ok(())
    }

    pub(crate) fn do_borrow(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
        let mut market = Self::ensure_active_market(market_id)?;
        let total_borrowed = market
            .total_borrowed
            .checked_add(amount)
            .ok_or(ArithmeticError::Overflow)?;
        ensure!(
            total_borrowed <= market.total_supply,
            Error::<T>::InsufficientLiquidity
        );
        ensure!(
            total_borrowed <= market.borrow_cap,
            Error::<T>::BorrowCapExceeded
        );
        let borrow_value = market.value_of(amount)?;
        ensure!(
            Self::health_factor(who, Zero::zero(), borrow_value)? > 1,
            Error::<T>::InsufficientCollateral
        );

        T::Assets::transfer(market.asset, &Self::account_id(), who, amount, false)?;
        Self::record_borrow(who, market_id, amount)?;
        market.total_borrowed = total_borrowed;
        Markets::<T>::insert(market_id, market);

        Ok(())
    }

    pub(crate) fn do_repay(
        who: &T::AccountId,
        market_id: &MarketId<T>,
        amount: Balance,
    ) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
        let mut market = Self::ensure_active_market(market_id)?;
        ensure!(
            Self::account_borrows(market_id, who) >= amount,
            Error::<T>::TooMuchRepay
        );
        let total_borrowed = market
            .total_borrowed
            .checked_sub(amount)
            .ok_or(ArithmeticError::Underflow)?;

        T::Assets::transfer(market.asset, who, &Self::account_id(), amount, false)?;
        Self::record_repay(who, market_id, amount)?;
        market.total_borrowed = total_borrowed;
        Markets::<T>::insert(market_id, market);

        Ok(())
    }

    /// Closes the whole position of `borrower`. The liquidator repays every borrow
    /// from its own balance and receives every collateral supply, with no bonus.
    ///
    /// A borrower without debt is never liquidatable, even when its health factor is
    /// zero for lack of collateral: closing such a position would move nothing.
    pub(crate) fn do_liquidate(liquidator: &T::AccountId, borrower: &T::AccountId) -> DispatchResult {
        ensure!(liquidator != borrower, Error::<T>::LiquidatorIsBorrower);
        ensure!(
            Self::borrow_markets(borrower).next().is_some(),
            Error::<T>::NotLiquidatable
        );
        ensure!(
            Self::health_factor(borrower, Zero::zero(), Zero::zero())? < 1,
            Error::<T>::NotLiquidatable
        );

        // Stage the market totals, then check them before moving any asset
        let mut markets: BTreeMap<MarketId<T>, Market<T>> = BTreeMap::new();
        let mut repayments = Vec::new();
        for market_id in Self::borrow_markets(borrower) {
            let amount = Self::account_borrows(market_id, borrower);
            let market = Self::staged_market(&mut markets, market_id)?;
            market.total_borrowed = market
                .total_borrowed
                .checked_sub(amount)
                .ok_or(ArithmeticError::Underflow)?;
            repayments.push((market.asset, amount));
        }
        let mut seizures = Vec::new();
        for market_id in Self::collateral_markets(borrower) {
            let amount = Self::account_supplies(market_id, borrower);
            let market = Self::staged_market(&mut markets, market_id)?;
            market.total_supply = market
                .total_supply
                .checked_sub(amount)
                .ok_or(ArithmeticError::Underflow)?;
            seizures.push((market.asset, amount));
        }
        ensure!(
            markets.values().all(|market| market.total_borrowed <= market.total_supply),
            Error::<T>::InsufficientLiquidity
        );

        let account_id = Self::account_id();
        for (asset, amount) in repayments {
            T::Assets::transfer(asset, liquidator, &account_id, amount, false)?;
        }
        for (asset, amount) in seizures {
            T::Assets::transfer(asset, &account_id, liquidator, amount, false)?;
        }
        Self::clear_all_positions(borrower);
        for (market_id, market) in markets {
            Markets::<T>::insert(market_id, market);
        }

        log::debug!(
            target: LOG_TARGET,
            "{:?} liquidated {:?}",
            liquidator,
            borrower,
        );
        Ok(())
    }

    fn staged_market(
        markets: &mut BTreeMap<MarketId<T>, Market<T>>,
        market_id: MarketId<T>,
    ) -> Result<&mut Market<T>, DispatchError> {
        match markets.entry(market_id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(Self::market(&market_id)?)),
        }
    }
}
