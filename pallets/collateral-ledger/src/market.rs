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

//! Market registry: listing, lookup and id derivation.

use super::*;

use primitives::{tokens::NATIVE, BPS_DENOMINATOR};
use sp_runtime::traits::Hash as HashT;

impl<T: Config> Pallet<T> {
    /// Derives the market id of `(name, asset)`. Pure, works for unlisted markets too.
    pub fn market_id(name: &[u8], asset: CurrencyId) -> MarketId<T> {
        T::Hashing::hash_of(&(name, asset))
    }

    // Returns a stored Market.
    //
    // Returns `Err` if market does not exist.
    pub fn market(market_id: &MarketId<T>) -> Result<Market<T>, DispatchError> {
        Markets::<T>::try_get(market_id).map_err(|_err| Error::<T>::MarketDoesNotExist.into())
    }

    pub fn price_of(market_id: &MarketId<T>) -> Result<Price, DispatchError> {
        Ok(Self::market(market_id)?.price)
    }

    // Mutates a stored Market.
    //
    // Returns `Err` if market does not exist or `cb` fails, leaving the market untouched.
    pub(crate) fn mutate_market<F>(market_id: &MarketId<T>, cb: F) -> DispatchResult
    where
        F: FnOnce(&mut Market<T>) -> DispatchResult,
    {
        Markets::<T>::try_mutate(market_id, |opt| match opt {
            Some(market) => cb(market),
            None => Err(Error::<T>::MarketDoesNotExist.into()),
        })
    }

    pub(crate) fn ensure_active_market(market_id: &MarketId<T>) -> Result<Market<T>, DispatchError> {
        let market = Self::market(market_id)?;
        ensure!(market.active, Error::<T>::MarketNotActivated);
        Ok(market)
    }

    /// Validates and stores a new, active and empty market.
    pub(crate) fn do_create_market(
        name: Vec<u8>,
        asset: CurrencyId,
        supply_cap: Balance,
        borrow_cap: Balance,
        ltv: Bps,
        price: Price,
    ) -> Result<MarketId<T>, DispatchError> {
        let market_id = Self::market_id(&name, asset);
        ensure!(
            !Markets::<T>::contains_key(market_id),
            Error::<T>::MarketAlreadyExists
        );
        ensure!(!name.is_empty(), Error::<T>::EmptyMarketName);
        ensure!(asset != NATIVE, Error::<T>::InvalidAsset);
        ensure!(!supply_cap.is_zero(), Error::<T>::ZeroSupplyCap);
        ensure!(!borrow_cap.is_zero(), Error::<T>::ZeroBorrowCap);
        ensure!(ltv < BPS_DENOMINATOR, Error::<T>::InvalidLtv);
        ensure!(!price.is_zero(), Error::<T>::ZeroPrice);

        let name: BoundedVec<u8, T::StringLimit> = name
            .try_into()
            .map_err(|_| Error::<T>::MarketNameTooLong)?;
        ensure!(
            Markets::<T>::count() < T::MaxMarkets::get(),
            Error::<T>::TooManyMarkets
        );
        Markets::<T>::insert(
            market_id,
            Market {
                name,
                asset,
                total_supply: Zero::zero(),
                total_borrowed: Zero::zero(),
                supply_cap,
                borrow_cap,
                ltv,
                price,
                active: true,
            },
        );

        Ok(market_id)
    }
}
