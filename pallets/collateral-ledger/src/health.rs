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
use primitives::{
    HealthFactor, UsdValue, BPS_DENOMINATOR, HEALTH_FACTOR_INFINITE, LIQUIDATION_THRESHOLD_BPS,
};
use sp_runtime::ArithmeticError;

/// `(collateral - withdraw) * LIQUIDATION_THRESHOLD_BPS / BPS_DENOMINATOR / (debt + borrow)`,
/// rounded down.
///
/// Without debt the ratio is `HEALTH_FACTOR_INFINITE`, without collateral it is zero.
pub fn calculate_health_factor(
    collateral: UsdValue,
    debt: UsdValue,
    withdraw_value: UsdValue,
    borrow_value: UsdValue,
) -> Result<HealthFactor, ArithmeticError> {
    if collateral.is_zero() {
        return Ok(Zero::zero());
    }
    let debt = debt
        .checked_add(borrow_value)
        .ok_or(ArithmeticError::Overflow)?;
    if debt.is_zero() {
        return Ok(HEALTH_FACTOR_INFINITE);
    }
    let threshold = mul_div_floor(
        collateral.saturating_sub(withdraw_value),
        LIQUIDATION_THRESHOLD_BPS.into(),
        BPS_DENOMINATOR.into(),
    )
    .ok_or(ArithmeticError::Overflow)?;

    Ok(threshold / debt)
}

impl<T: Config> Pallet<T> {
    /// Health factor of `who` after hypothetically withdrawing `withdraw_value` of
    /// collateral and borrowing `borrow_value` more, both in USD.
    pub fn health_factor(
        who: &T::AccountId,
        withdraw_value: UsdValue,
        borrow_value: UsdValue,
    ) -> Result<HealthFactor, DispatchError> {
        let valuation = Self::valuate(who)?;
        let health_factor = calculate_health_factor(
            valuation.total_collateral,
            valuation.total_borrowed,
            withdraw_value,
            borrow_value,
        )?;
        log::trace!(
            target: LOG_TARGET,
            "health factor of {:?}: {:?}, withdraw: {:?}, borrow: {:?}",
            who,
            health_factor,
            withdraw_value,
            borrow_value,
        );

        Ok(health_factor)
    }
}
