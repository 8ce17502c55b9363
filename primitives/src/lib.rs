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

#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;

pub mod tokens;

/// Balance of an account, in the smallest unit of its asset.
pub type Balance = u128;

/// USD-equivalent value of one unit of an asset.
pub type Price = u128;

/// A USD-denominated amount, i.e. `Balance * Price`.
pub type UsdValue = u128;

/// Solvency ratio of an account. `HEALTH_FACTOR_INFINITE` means no debt.
pub type HealthFactor = u128;

/// Basis points, integer units of 1/10000.
pub type Bps = u32;

pub type Timestamp = u64;

pub type CurrencyId = u32;

pub const BPS_DENOMINATOR: Bps = 10_000;

/// Share of collateral value counted towards solvency when computing the health factor.
pub const LIQUIDATION_THRESHOLD_BPS: Bps = 8_000;

pub const HEALTH_FACTOR_INFINITE: HealthFactor = HealthFactor::MAX;

/// The collateral valuation of an account.
#[derive(
    Encode, Decode, Eq, PartialEq, Copy, Clone, Default, RuntimeDebug, TypeInfo, MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Valuation {
    /// Sum of `supplied * price` over the collateral markets.
    pub total_collateral: UsdValue,
    /// LTV discounted collateral net of debt, floored at zero.
    pub usable_collateral: UsdValue,
    /// Sum of `borrowed * price` over the borrow markets.
    pub total_borrowed: UsdValue,
}
