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

#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(clippy::all)]

use frame_support::{traits::Get, weights::Weight};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_collateral_ledger.
pub trait WeightInfo {
    fn create_market() -> Weight;
    fn set_market_price() -> Weight;
    fn set_market_active() -> Weight;
    fn supply() -> Weight;
    fn withdraw() -> Weight;
    fn borrow() -> Weight;
    fn repay() -> Weight;
    fn liquidate(m: u32) -> Weight;
}

/// Weights for pallet_collateral_ledger using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    fn create_market() -> Weight {
        Weight::from_ref_time(30_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(1 as u64))
            .saturating_add(T::DbWeight::get().writes(1 as u64))
    }
    fn set_market_price() -> Weight {
        Weight::from_ref_time(20_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(1 as u64))
            .saturating_add(T::DbWeight::get().writes(1 as u64))
    }
    fn set_market_active() -> Weight {
        Weight::from_ref_time(20_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(1 as u64))
            .saturating_add(T::DbWeight::get().writes(1 as u64))
    }
    fn supply() -> Weight {
        Weight::from_ref_time(60_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(6 as u64))
            .saturating_add(T::DbWeight::get().writes(6 as u64))
    }
    fn withdraw() -> Weight {
        Weight::from_ref_time(80_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(9 as u64))
            .saturating_add(T::DbWeight::get().writes(6 as u64))
    }
    fn borrow() -> Weight {
        Weight::from_ref_time(90_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(10 as u64))
            .saturating_add(T::DbWeight::get().writes(6 as u64))
    }
    fn repay() -> Weight {
        Weight::from_ref_time(60_000_000 as u64)
            .saturating_add(T::DbWeight::get().reads(6 as u64))
            .saturating_add(T::DbWeight::get().writes(6 as u64))
    }
    /// `m` is the number of markets the borrower uses.
    fn liquidate(m: u32) -> Weight {
        Weight::from_ref_time(60_000_000 as u64)
            .saturating_add(Weight::from_ref_time(45_000_000 as u64).saturating_mul(m as u64))
            .saturating_add(T::DbWeight::get().reads(3 as u64))
            .saturating_add(T::DbWeight::get().reads((5 as u64).saturating_mul(m as u64)))
            .saturating_add(T::DbWeight::get().writes(1 as u64))
            .saturating_add(T::DbWeight::get().writes((6 as u64).saturating_mul(m as u64)))
    }
}

// For backwards compatibility and tests
impl WeightInfo for () {
    fn create_market() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn set_market_price() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn set_market_active() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn supply() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn withdraw() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn borrow() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn repay() -> Weight {
        Weight::from_ref_time(10_000 as u64)
    }
    fn liquidate(m: u32) -> Weight {
        Weight::from_ref_time(10_000 as u64).saturating_mul(m as u64)
    }
}
