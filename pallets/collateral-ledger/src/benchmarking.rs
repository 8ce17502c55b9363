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

//! Benchmarks for Collateral Ledger Pallet

#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::Pallet as Ledger;
use frame_benchmarking::{account, benchmarks, impl_benchmark_test_suite, whitelisted_caller};
use frame_support::assert_ok;
use frame_system::RawOrigin as SystemOrigin;
use primitives::tokens::{DOT, KSM, USDT};
use sp_runtime::traits::StaticLookup;

const SEED: u32 = 0;
const KSM_PRICE: Price = 2_000;
const USDT_PRICE: Price = 1;

pub fn dollar(d: u128) -> u128 {
    d.saturating_mul(10_u128.pow(12))
}

fn ksm_market<T: Config>() -> MarketId<T> {
    Ledger::<T>::market_id(b"bench-ksm", KSM)
}

fn usdt_market<T: Config>() -> MarketId<T> {
    Ledger::<T>::market_id(b"bench-usdt", USDT)
}

fn mint_assets<T: Config + pallet_assets::Config<AssetId = CurrencyId, Balance = Balance>>(
    who: &T::AccountId,
) {
    for asset in [KSM, USDT] {
        pallet_assets::Pallet::<T>::force_create(
            SystemOrigin::Root.into(),
            asset.into(),
            T::Lookup::unlookup(who.clone()),
            true,
            1,
        )
        .ok();
        assert_ok!(T::Assets::mint_into(asset, who, dollar(1_000_000_000)));
    }
}

fn initial_set_up<T: Config>() {
    assert_ok!(Ledger::<T>::create_market(
        SystemOrigin::Root.into(),
        b"bench-ksm".to_vec(),
        KSM,
        dollar(1_000_000),
        dollar(500_000),
        5_000,
        KSM_PRICE
    ));
    assert_ok!(Ledger::<T>::create_market(
        SystemOrigin::Root.into(),
        b"bench-usdt".to_vec(),
        USDT,
        dollar(1_000_000_000),
        dollar(500_000_000),
        9_000,
        USDT_PRICE
    ));
}

/// `borrower` holds 1 KSM of collateral and owes 400 USDT to `lender`'s supply.
fn borrow_set_up<T: Config + pallet_assets::Config<AssetId = CurrencyId, Balance = Balance>>(
    lender: &T::AccountId,
    borrower: &T::AccountId,
) {
    mint_assets::<T>(lender);
    mint_assets::<T>(borrower);
    initial_set_up::<T>();
    assert_ok!(Ledger::<T>::supply(
        SystemOrigin::Signed(lender.clone()).into(),
        usdt_market::<T>(),
        dollar(10_000)
    ));
    assert_ok!(Ledger::<T>::supply(
        SystemOrigin::Signed(borrower.clone()).into(),
        ksm_market::<T>(),
        dollar(1)
    ));
    assert_ok!(Ledger::<T>::borrow(
        SystemOrigin::Signed(borrower.clone()).into(),
        usdt_market::<T>(),
        dollar(400)
    ));
}

fn assert_last_event<T: Config>(generic_event: <T as Config>::RuntimeEvent) {
    frame_system::Pallet::<T>::assert_last_event(generic_event.into());
}

benchmarks! {
    where_clause {
        where
            T: pallet_assets::Config<AssetId = CurrencyId, Balance = Balance>
    }

    create_market {
        let name = b"bench-dot".to_vec();
        let market_id = Ledger::<T>::market_id(&name, DOT);
    }: _(SystemOrigin::Root, name.clone(), DOT, dollar(1_000), dollar(100), 5_000, 5)
    verify {
        assert_last_event::<T>(Event::<T>::MarketCreated(market_id, name, DOT, dollar(1_000), dollar(100)).into());
    }

    set_market_price {
        initial_set_up::<T>();
    }: _(SystemOrigin::Root, ksm_market::<T>(), 950)
    verify {
        assert_last_event::<T>(Event::<T>::MarketPriceUpdated(ksm_market::<T>(), 950).into());
    }

    set_market_active {
        initial_set_up::<T>();
    }: _(SystemOrigin::Root, ksm_market::<T>(), false)
    verify {
        assert_last_event::<T>(Event::<T>::MarketDeactivated(ksm_market::<T>()).into());
    }

    supply {
        let caller: T::AccountId = whitelisted_caller();
        mint_assets::<T>(&caller);
        initial_set_up::<T>();
        let amount = dollar(100);
    }: _(SystemOrigin::Signed(caller.clone()), ksm_market::<T>(), amount)
    verify {
        assert_last_event::<T>(Event::<T>::Deposited(caller, ksm_market::<T>(), amount).into());
    }

    withdraw {
        let caller: T::AccountId = whitelisted_caller();
        mint_assets::<T>(&caller);
        initial_set_up::<T>();
        let amount = dollar(100);
        assert_ok!(Ledger::<T>::supply(SystemOrigin::Signed(caller.clone()).into(), ksm_market::<T>(), amount));
    }: _(SystemOrigin::Signed(caller.clone()), ksm_market::<T>(), amount)
    verify {
        assert_last_event::<T>(Event::<T>::Withdrawn(caller, ksm_market::<T>(), amount).into());
    }

    borrow {
        let caller: T::AccountId = whitelisted_caller();
        let lender: T::AccountId = account("Ledger", 101, SEED);
        borrow_set_up::<T>(&lender, &caller);
        let amount = dollar(100);
    }: _(SystemOrigin::Signed(caller.clone()), usdt_market::<T>(), amount)
    verify {
        assert_last_event::<T>(Event::<T>::Borrowed(caller, usdt_market::<T>(), amount).into());
    }

    repay {
        let caller: T::AccountId = whitelisted_caller();
        let lender: T::AccountId = account("Ledger", 101, SEED);
        borrow_set_up::<T>(&lender, &caller);
        let amount = dollar(400);
    }: _(SystemOrigin::Signed(caller.clone()), usdt_market::<T>(), amount)
    verify {
        assert_last_event::<T>(Event::<T>::Repaid(caller, usdt_market::<T>(), amount).into());
    }

    liquidate {
        let caller: T::AccountId = whitelisted_caller();
        let borrower: T::AccountId = account("Ledger", 102, SEED);
        borrow_set_up::<T>(&caller, &borrower);
        assert_ok!(Ledger::<T>::set_market_price(SystemOrigin::Root.into(), ksm_market::<T>(), 400));
    }: _(SystemOrigin::Signed(caller.clone()), borrower.clone())
    verify {
        assert_last_event::<T>(Event::<T>::Liquidated(caller, borrower).into());
    }
}

impl_benchmark_test_suite!(Ledger, crate::mock::new_test_ext(), crate::mock::Test);
