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

use crate::{mock::*, Error, ReentrancyLock};
use frame_support::{assert_noop, assert_ok};

/// The custody account holds exactly the unborrowed part of every market.
fn assert_custody_matches_markets() {
    for market_id in [ksm_market(), usdt_market(), dot_market()] {
        let market = Ledger::market(&market_id).unwrap();
        assert_eq!(
            asset_balance(market.asset, &Ledger::account_id()),
            market.total_supply - market.total_borrowed
        );
    }
    assert_markets_consistent();
}

#[test]
fn paused_ledger_rejects_operations() {
    new_test_ext().execute_with(|| {
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            ksm_market(),
            unit(10)
        ));
        assert_ok!(EmergencyShutdown::pause(RuntimeOrigin::root()));

        assert_noop!(
            Ledger::create_market(
                RuntimeOrigin::root(),
                b"KUSD".to_vec(),
                primitives::tokens::KUSD,
                unit(1),
                unit(1),
                5_000,
                1
            ),
            Error::<Test>::LedgerPaused
        );
        assert_noop!(
            Ledger::supply(RuntimeOrigin::signed(ALICE), ksm_market(), unit(1)),
            Error::<Test>::LedgerPaused
        );
        assert_noop!(
            Ledger::withdraw(RuntimeOrigin::signed(ALICE), ksm_market(), unit(1)),
            Error::<Test>::LedgerPaused
        );
        assert_noop!(
            Ledger::borrow(RuntimeOrigin::signed(ALICE), ksm_market(), unit(1)),
            Error::<Test>::LedgerPaused
        );
        assert_noop!(
            Ledger::repay(RuntimeOrigin::signed(ALICE), ksm_market(), unit(1)),
            Error::<Test>::LedgerPaused
        );
        assert_noop!(
            Ledger::liquidate(RuntimeOrigin::signed(BOB), ALICE),
            Error::<Test>::LedgerPaused
        );
        // Market administration keeps working
        assert_ok!(Ledger::set_market_price(
            RuntimeOrigin::root(),
            ksm_market(),
            1_000
        ));

        assert_ok!(EmergencyShutdown::unpause(RuntimeOrigin::root()));
        assert_ok!(Ledger::withdraw(
            RuntimeOrigin::signed(ALICE),
            ksm_market(),
            unit(10)
        ));
    })
}

#[test]
fn reentrant_calls_are_rejected() {
    new_test_ext().execute_with(|| {
        ReentrancyLock::<Test>::put(true);
        assert_noop!(
            Ledger::supply(RuntimeOrigin::signed(ALICE), ksm_market(), unit(1)),
            Error::<Test>::ReentrantCall
        );
        assert_noop!(
            Ledger::liquidate(RuntimeOrigin::signed(BOB), ALICE),
            Error::<Test>::ReentrantCall
        );

        ReentrancyLock::<Test>::kill();
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            ksm_market(),
            unit(1)
        ));
        // Released once the call returns
        assert!(!ReentrancyLock::<Test>::get());
    })
}

#[test]
fn failed_transfer_leaves_ledger_untouched() {
    new_test_ext().execute_with(|| {
        // Dave holds no KSM
        assert!(Ledger::supply(RuntimeOrigin::signed(DAVE), ksm_market(), unit(1)).is_err());

        assert_eq!(Ledger::account_supplies(ksm_market(), DAVE), 0);
        assert_eq!(Ledger::market(&ksm_market()).unwrap().total_supply, 0);
        assert_eq!(Ledger::collateral_markets(&DAVE).count(), 0);
        assert_eq!(Ledger::last_update_time(DAVE), 0);
        assert!(!ReentrancyLock::<Test>::get());
    })
}

#[test]
fn withdraw_and_borrow_use_different_health_bounds() {
    new_test_ext().execute_with(|| {
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            usdt_market(),
            unit(1_000)
        ));
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(BOB),
            ksm_market(),
            unit(1)
        ));
        assert_ok!(Ledger::borrow(
            RuntimeOrigin::signed(BOB),
            usdt_market(),
            unit(800)
        ));

        // Withdrawing is allowed down to a health factor of one:
        // (2000 - 500) * 0.8 / 800 = 1.5
        assert_ok!(Ledger::withdraw(
            RuntimeOrigin::signed(BOB),
            ksm_market(),
            unit(1) / 4
        ));
        assert_eq!(Ledger::health_factor(&BOB, 0, 0), Ok(1));
        // while borrowing requires more than one
        assert_noop!(
            Ledger::borrow(RuntimeOrigin::signed(BOB), usdt_market(), 1),
            Error::<Test>::InsufficientCollateral
        );
        // (1500 - 400) * 0.8 / 800 = 1.1
        assert_ok!(Ledger::withdraw(
            RuntimeOrigin::signed(BOB),
            ksm_market(),
            unit(1) / 5
        ));
        // (1100 - 200) * 0.8 / 800 = 0.9
        assert_noop!(
            Ledger::withdraw(RuntimeOrigin::signed(BOB), ksm_market(), unit(1) / 10),
            Error::<Test>::InsufficientCollateral
        );
    })
}

#[test]
fn last_update_time_tracks_balance_changes() {
    new_test_ext().execute_with(|| {
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            usdt_market(),
            unit(1_000)
        ));
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(BOB),
            ksm_market(),
            unit(1)
        ));
        assert_eq!(Ledger::last_update_time(BOB), 6);

        TimestampPallet::set_timestamp(12_000);
        assert_ok!(Ledger::borrow(
            RuntimeOrigin::signed(BOB),
            usdt_market(),
            unit(100)
        ));
        assert_eq!(Ledger::last_update_time(BOB), 12);
        assert_eq!(Ledger::last_update_time(ALICE), 6);

        TimestampPallet::set_timestamp(18_000);
        assert_ok!(Ledger::set_market_price(
            RuntimeOrigin::root(),
            ksm_market(),
            100
        ));
        assert_ok!(Ledger::liquidate(RuntimeOrigin::signed(CHARLIE), BOB));
        assert_eq!(Ledger::last_update_time(BOB), 18);
    })
}

#[test]
fn multi_user_sequence_keeps_markets_consistent() {
    new_test_ext().execute_with(|| {
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            usdt_market(),
            unit(50_000)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(ALICE),
            ksm_market(),
            unit(200)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(BOB),
            ksm_market(),
            unit(10)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::supply(
            RuntimeOrigin::signed(CHARLIE),
            dot_market(),
            unit(1_000)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::borrow(
            RuntimeOrigin::signed(BOB),
            usdt_market(),
            unit(5_000)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::borrow(
            RuntimeOrigin::signed(ALICE),
            dot_market(),
            unit(500)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::repay(
            RuntimeOrigin::signed(BOB),
            usdt_market(),
            unit(2_000)
        ));
        assert_custody_matches_markets();
        assert_ok!(Ledger::withdraw(
            RuntimeOrigin::signed(ALICE),
            ksm_market(),
            unit(100)
        ));
        assert_custody_matches_markets();
        assert_noop!(
            Ledger::withdraw(RuntimeOrigin::signed(CHARLIE), dot_market(), unit(600)),
            Error::<Test>::InsufficientLiquidity
        );
        assert_ok!(Ledger::repay(
            RuntimeOrigin::signed(ALICE),
            dot_market(),
            unit(500)
        ));
        assert_ok!(Ledger::withdraw(
            RuntimeOrigin::signed(CHARLIE),
            dot_market(),
            unit(1_000)
        ));
        assert_custody_matches_markets();

        // Every borrower is left strictly healthy
        for who in [ALICE, BOB, CHARLIE] {
            if Ledger::borrow_markets(&who).count() > 0 {
                assert!(Ledger::health_factor(&who, 0, 0).unwrap() > 1);
            }
        }
    })
}
