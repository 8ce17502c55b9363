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

//! Runtime API of the collateral ledger.
//!
//! A runtime exposes it with `impl_runtime_apis!`, forwarding each call to
//! `pallet_collateral_ledger::Pallet`: `market_id`, `account_supplies`,
//! `account_borrows`, `valuate` and `health_factor`. This workspace ships no
//! runtime, so those pallet functions are tested directly in the pallet crate.

#![cfg_attr(not(feature = "std"), no_std)]

use codec::Codec;
use primitives::{Balance, CurrencyId, HealthFactor, UsdValue, Valuation};
use sp_runtime::DispatchError;
use sp_std::vec::Vec;

sp_api::decl_runtime_apis! {
    pub trait CollateralLedgerApi<AccountId, MarketId> where
        AccountId: Codec,
        MarketId: Codec, {
        fn market_id(name: Vec<u8>, asset: CurrencyId) -> MarketId;
        fn supplied_balance(account: AccountId, market_id: MarketId) -> Balance;
        fn borrowed_balance(account: AccountId, market_id: MarketId) -> Balance;
        fn account_valuation(account: AccountId) -> Result<Valuation, DispatchError>;
        fn health_factor(
            account: AccountId,
            withdraw_value: UsdValue,
            borrow_value: UsdValue,
        ) -> Result<HealthFactor, DispatchError>;
    }
}
