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

use super::*;

use pallet_traits::mul_div_floor;
use primitives::{UsdValue, Valuation, BPS_DENOMINATOR};
use sp_runtime::ArithmeticError;

impl<T: Config> Pallet<T> {
    /// USD valuation of an account at current market prices.
    ///
    /// Collateral is summed over the account's collateral markets and debt over its
    /// borrow markets. Usable collateral is the LTV discounted collateral net of debt,
    /// floored at zero.
    pub fn valuate(who: &T::AccountId) -> Result<Valuation, DispatchError> {
        let mut total_collateral: UsdValue = Zero::zero();
        let mut discounted_collateral: UsdValue = Zero::zero();
        for market_id in Self::collateral_markets(who) {
            let market = Self::market(&market_id)?;
            let value = market.value_of(Self::account_supplies(market_id, who))?;
            let discounted = mul_div_floor(value, market.ltv.into(), BPS_DENOMINATOR.into())
                .ok_or(ArithmeticError::Overflow)?;
            total_collateral = total_collateral
                .checked_add(value)
                .ok_or(ArithmeticError::Overflow)?;
            discounted_collateral = discounted_collateral
                .checked_add(discounted)
                .ok_or(ArithmeticError::Overflow)?;
        }

        let mut total_borrowed: UsdValue = Zero::zero();
        for market_id in Self::borrow_markets(who) {
            let market = Self::market(&market_id)?;
            total_borrowed = market
                .value_of(Self::account_borrows(market_id, who))?
                .checked_add(total_borrowed)
                .ok_or(ArithmeticError::Overflow)?;
        }

        Ok(Valuation {
            total_collateral,
            usable_collateral: discounted_collateral.saturating_sub(total_borrowed),
            total_borrowed,
        })
    }
}
