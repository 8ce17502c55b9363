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

use crate::*;

use frame_support::pallet_prelude::*;
use primitives::{Balance, Bps, CurrencyId, Price, UsdValue};
use sp_runtime::{traits::Zero, ArithmeticError};

/// Market.
///
/// One listed asset with its own caps, collateral weight and price.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[scale_info(skip_type_params(T))]
#[codec(mel_bound())]
pub struct Market<T: Config> {
    /// Human readable name, part of the market id
    pub name: BoundedVec<u8, T::StringLimit>,
    /// The asset traded in this market
    pub asset: CurrencyId,
    /// Units currently deposited across all accounts
    pub total_supply: Balance,
    /// Units currently borrowed across all accounts
    pub total_borrowed: Balance,
    /// Upper bound of `total_supply`
    pub supply_cap: Balance,
    /// Upper bound of `total_borrowed`
    pub borrow_cap: Balance,
    /// Loan to value in basis points, zero means not usable as collateral
    pub ltv: Bps,
    /// USD value of one unit
    pub price: Price,
    /// Only active markets accept operations
    pub active: bool,
}

impl<T: Config> Market<T> {
    pub fn is_collateral(&self) -> bool {
        !self.ltv.is_zero()
    }

    /// USD value of `amount` units at the current price.
    pub fn value_of(&self, amount: Balance) -> Result<UsdValue, DispatchError> {
        Ok(amount
            .checked_mul(self.price)
            .ok_or(ArithmeticError::Overflow)?)
    }

    /// Checks `total_borrowed <= total_supply <= supply_cap` and `total_borrowed <= borrow_cap`.
    pub fn is_consistent(&self) -> bool {
        self.total_borrowed <= self.total_supply
            && self.total_supply <= self.supply_cap
            && self.total_borrowed <= self.borrow_cap
    }
}
