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

//! # Collateral Ledger pallet
//!
//! ## Overview
//!
//! Collateral ledger tracks how much of each listed asset every account has supplied
//! and borrowed, values collateral in USD and decides whether an account is solvent
//! enough to withdraw, borrow more, or must be liquidated.
//!
//! Markets are keyed by `hash(name, asset)`. Each account keeps per market supplied and
//! borrowed balances plus the sets of markets it uses as collateral and borrows from, so
//! valuation only touches the account's own footprint.
//!
//! The health factor of an account is
//! `(collateral - withdraw) * LIQUIDATION_THRESHOLD_BPS / BPS_DENOMINATOR / (debt + borrow)`
//! rounded down. Borrowing requires it to stay above one, withdrawing above zero, and an
//! account whose health factor drops below one can be fully liquidated by anyone: the
//! liquidator pays every debt and receives every collateral.

#![cfg_attr(not(feature = "std"), no_std)]

use frame_support::{
    pallet_prelude::*,
    traits::{
        tokens::fungibles::{Inspect, Mutate, Transfer},
        UnixTime,
    },
    transactional, PalletId,
};
use frame_system::pallet_prelude::*;
pub use pallet::*;
use pallet_traits::EmergencyShutdown;
use primitives::{Balance, Bps, CurrencyId, Price};
use sp_runtime::traits::{AccountIdConversion, Zero};
use sp_std::prelude::*;

pub use types::Market;
pub use weights::WeightInfo;

mod benchmarking;

#[cfg(test)]
mod mock;

mod health;
mod ledger;
mod market;
mod operations;
mod types;
mod valuation;

pub mod weights;

pub use health::calculate_health_factor;

pub(crate) const LOG_TARGET: &str = "runtime::collateral-ledger";

/// Markets are identified by `hash(name, asset)`.
pub type MarketId<T> = <T as frame_system::Config>::Hash;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Assets moved between accounts and the ledger's custody account
        type Assets: Transfer<Self::AccountId, AssetId = CurrencyId, Balance = Balance>
            + Inspect<Self::AccountId, AssetId = CurrencyId, Balance = Balance>
            + Mutate<Self::AccountId, AssetId = CurrencyId, Balance = Balance>;

        /// The ledger's module id, keeps every supplied asset.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Max length of a market name
        #[pallet::constant]
        type StringLimit: Get<u32>;

        /// Max number of listed markets, bounds every per account iteration
        #[pallet::constant]
        type MaxMarkets: Get<u32>;

        /// Unix time
        type UnixTime: UnixTime;

        /// The origin which can create markets and toggle their state.
        type UpdateOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// The origin which can update market prices.
        type FeederOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Pause switch, user operations fail while it is on
        type EmergencyShutdown: EmergencyShutdown;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Market name is empty
        EmptyMarketName,
        /// Market name is longer than `StringLimit`
        MarketNameTooLong,
        /// The reserved native asset can not be listed
        InvalidAsset,
        /// Supply cap must be positive
        ZeroSupplyCap,
        /// Borrow cap must be positive
        ZeroBorrowCap,
        /// Loan to value must be below 100%
        InvalidLtv,
        /// Price must be positive
        ZeroPrice,
        /// Amount must be positive
        ZeroAmount,
        /// Market already exists
        MarketAlreadyExists,
        /// `MaxMarkets` markets are already listed
        TooManyMarkets,
        /// Market does not exist
        MarketDoesNotExist,
        /// Market not activated
        MarketNotActivated,
        /// Market is already in the requested state
        DuplicateOperation,
        /// Deposit would exceed the supply cap
        SupplyCapExceeded,
        /// Borrow would exceed the borrow cap
        BorrowCapExceeded,
        /// Not enough unborrowed supply in the market
        InsufficientLiquidity,
        /// Insufficient deposit to withdraw
        InsufficientDeposit,
        /// Repay amount greater than the borrowed amount
        TooMuchRepay,
        /// Health factor too low for the requested operation
        InsufficientCollateral,
        /// Account is healthy or has no debt
        NotLiquidatable,
        /// Liquidator is same as borrower
        LiquidatorIsBorrower,
        /// Ledger is paused
        LedgerPaused,
        /// A ledger operation is already in progress
        ReentrantCall,
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub (crate) fn deposit_event)]
    pub enum Event<T: Config> {
        /// New market is listed
        /// [market_id, name, asset_id, supply_cap, borrow_cap]
        MarketCreated(MarketId<T>, Vec<u8>, CurrencyId, Balance, Balance),
        /// Event emitted when assets are deposited
        /// [sender, market_id, amount]
        Deposited(T::AccountId, MarketId<T>, Balance),
        /// Event emitted when assets are withdrawn
        /// [sender, market_id, amount]
        Withdrawn(T::AccountId, MarketId<T>, Balance),
        /// Event emitted when assets are borrowed
        /// [sender, market_id, amount]
        Borrowed(T::AccountId, MarketId<T>, Balance),
        /// Event emitted when a borrow is repaid
        /// [sender, market_id, amount]
        Repaid(T::AccountId, MarketId<T>, Balance),
        /// Event emitted when a position is liquidated
        /// [liquidator, borrower]
        Liquidated(T::AccountId, T::AccountId),
        /// [market_id, price]
        MarketPriceUpdated(MarketId<T>, Price),
        /// [market_id]
        MarketActivated(MarketId<T>),
        /// [market_id]
        MarketDeactivated(MarketId<T>),
    }

    /// Mapping of market id to its market
    #[pallet::storage]
    pub type Markets<T: Config> =
        CountedStorageMap<_, Blake2_128Concat, MarketId<T>, Market<T>>;

    /// Supplied units per account
    /// MarketId -> Owner -> Balance
    #[pallet::storage]
    #[pallet::getter(fn account_supplies)]
    pub type AccountSupplies<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        MarketId<T>,
        Blake2_128Concat,
        T::AccountId,
        Balance,
        ValueQuery,
    >;

    /// Borrowed units per account
    /// MarketId -> Owner -> Balance
    #[pallet::storage]
    #[pallet::getter(fn account_borrows)]
    pub type AccountBorrows<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        MarketId<T>,
        Blake2_128Concat,
        T::AccountId,
        Balance,
        ValueQuery,
    >;

    /// Markets where the account has a non-zero supply counted as collateral
    /// Owner -> MarketId -> ()
    #[pallet::storage]
    pub type AccountCollateralMarkets<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Blake2_128Concat, MarketId<T>, ()>;

    /// Markets where the account has a non-zero borrow
    /// Owner -> MarketId -> ()
    #[pallet::storage]
    pub type AccountBorrowMarkets<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Blake2_128Concat, MarketId<T>, ()>;

    /// Unix time of the last operation touching the account's position
    #[pallet::storage]
    #[pallet::getter(fn last_update_time)]
    pub type AccountLastUpdate<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, primitives::Timestamp, ValueQuery>;

    /// Set while a ledger operation is executing
    #[pallet::storage]
    pub type ReentrancyLock<T: Config> = StorageValue<_, bool, ValueQuery>;

    #[pallet::genesis_config]
    pub struct GenesisConfig {
        /// [name, asset_id, supply_cap, borrow_cap, ltv, price]
        pub markets: Vec<(Vec<u8>, CurrencyId, Balance, Balance, Bps, Price)>,
    }

    #[cfg(feature = "std")]
    impl Default for GenesisConfig {
        fn default() -> Self {
            GenesisConfig {
                markets: Default::default(),
            }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> GenesisBuild<T> for GenesisConfig {
        fn build(&self) {
            for (name, asset, supply_cap, borrow_cap, ltv, price) in self.markets.iter() {
                Pallet::<T>::do_create_market(
                    name.clone(),
                    *asset,
                    *supply_cap,
                    *borrow_cap,
                    *ltv,
                    *price,
                )
                .expect("genesis market is invalid");
            }
        }
    }

    #[pallet::pallet]
    pub struct Pallet<T>(PhantomData<T>);

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Lists a new market. The market id is `hash(name, asset)`.
        ///
        /// - `name`: market name, non-empty and at most `StringLimit` bytes.
        /// - `asset`: the asset traded in the market, can't be the native asset.
        /// - `supply_cap`: max units supplied across all accounts.
        /// - `borrow_cap`: max units borrowed across all accounts.
        /// - `ltv`: loan to value in basis points, below 10000. Zero disables collateral.
        /// - `price`: USD value of one unit.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::create_market())]
        #[transactional]
        pub fn create_market(
            origin: OriginFor<T>,
            name: Vec<u8>,
            asset: CurrencyId,
            supply_cap: Balance,
            borrow_cap: Balance,
            ltv: Bps,
            price: Price,
        ) -> DispatchResultWithPostInfo {
            T::UpdateOrigin::ensure_origin(origin)?;
            Self::ensure_not_paused()?;

            let market_id = Self::with_reentrancy_guard(|| {
                Self::do_create_market(name.clone(), asset, supply_cap, borrow_cap, ltv, price)
            })?;

            Self::deposit_event(Event::<T>::MarketCreated(
                market_id, name, asset, supply_cap, borrow_cap,
            ));
            Ok(().into())
        }

        /// Updates the price of a market.
        ///
        /// - `market_id`: the market to update.
        /// - `price`: new USD value of one unit.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_market_price())]
        #[transactional]
        pub fn set_market_price(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            price: Price,
        ) -> DispatchResultWithPostInfo {
            T::FeederOrigin::ensure_origin(origin)?;
            ensure!(!price.is_zero(), Error::<T>::ZeroPrice);

            Self::mutate_market(&market_id, |market| {
                market.price = price;
                Ok(())
            })?;

            Self::deposit_event(Event::<T>::MarketPriceUpdated(market_id, price));
            Ok(().into())
        }

        /// Activates or deactivates a market. Inactive markets reject supply, withdraw,
        /// borrow and repay.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_market_active())]
        #[transactional]
        pub fn set_market_active(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            active: bool,
        ) -> DispatchResultWithPostInfo {
            T::UpdateOrigin::ensure_origin(origin)?;

            Self::mutate_market(&market_id, |market| {
                ensure!(market.active != active, Error::<T>::DuplicateOperation);
                market.active = active;
                Ok(())
            })?;

            if active {
                Self::deposit_event(Event::<T>::MarketActivated(market_id));
            } else {
                Self::deposit_event(Event::<T>::MarketDeactivated(market_id));
            }
            Ok(().into())
        }

        /// Sender supplies assets into the market.
        ///
        /// - `market_id`: the market to deposit into.
        /// - `amount`: the amount to be deposited.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::supply())]
        #[transactional]
        pub fn supply(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            amount: Balance,
        ) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;

            Self::with_reentrancy_guard(|| Self::do_supply(&who, &market_id, amount))?;

            Self::deposit_event(Event::<T>::Deposited(who, market_id, amount));
            Ok(().into())
        }

        /// Sender withdraws some of their supplied assets.
        ///
        /// - `market_id`: the market to withdraw from.
        /// - `amount`: the amount to be withdrawn.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::withdraw())]
        #[transactional]
        pub fn withdraw(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            amount: Balance,
        ) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;

            Self::with_reentrancy_guard(|| Self::do_withdraw(&who, &market_id, amount))?;

            Self::deposit_event(Event::<T>::Withdrawn(who, market_id, amount));
            Ok(().into())
        }

        /// Sender borrows assets from the market to their own address.
        ///
        /// - `market_id`: the market to borrow from.
        /// - `amount`: the amount to be borrowed.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::borrow())]
        #[transactional]
        pub fn borrow(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            amount: Balance,
        ) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;

            Self::with_reentrancy_guard(|| Self::do_borrow(&who, &market_id, amount))?;

            Self::deposit_event(Event::<T>::Borrowed(who, market_id, amount));
            Ok(().into())
        }

        /// Sender repays some of their debt. Repaying more than borrowed is rejected.
        ///
        /// - `market_id`: the market to repay to.
        /// - `amount`: the amount to be repaid.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::repay())]
        #[transactional]
        pub fn repay(
            origin: OriginFor<T>,
            market_id: MarketId<T>,
            amount: Balance,
        ) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;

            Self::with_reentrancy_guard(|| Self::do_repay(&who, &market_id, amount))?;

            Self::deposit_event(Event::<T>::Repaid(who, market_id, amount));
            Ok(().into())
        }

        /// The sender closes the whole position of an unhealthy borrower: every debt is
        /// paid by the sender and every collateral goes to the sender.
        ///
        /// - `borrower`: the borrower to be liquidated.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::liquidate(T::MaxMarkets::get()))]
        #[transactional]
        pub fn liquidate(
            origin: OriginFor<T>,
            borrower: T::AccountId,
        ) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::ensure_not_paused()?;

            Self::with_reentrancy_guard(|| Self::do_liquidate(&who, &borrower))?;

            Self::deposit_event(Event::<T>::Liquidated(who, borrower));
            Ok(().into())
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Custody account of every supplied asset.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    fn ensure_not_paused() -> DispatchResult {
        ensure!(
            !T::EmergencyShutdown::is_shut_down(),
            Error::<T>::LedgerPaused
        );
        Ok(())
    }

    /// Runs `f` with the reentrancy lock held. Fails if the lock is already held.
    pub(crate) fn with_reentrancy_guard<R>(
        f: impl FnOnce() -> Result<R, DispatchError>,
    ) -> Result<R, DispatchError> {
        if ReentrancyLock::<T>::get() {
            log::warn!(target: LOG_TARGET, "rejected reentrant ledger call");
            return Err(Error::<T>::ReentrantCall.into());
        }
        ReentrancyLock::<T>::put(true);
        let result = f();
        ReentrancyLock::<T>::kill();
        result
    }
}
