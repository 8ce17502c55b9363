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

//! # Emergency Shut-Down pallet
//!
//! ## Overview
//!
//! Holds a single pause flag toggled by `ShutdownOrigin`. While the flag is on:
//! - the pallet, used as part of the runtime's `BaseCallFilter`, rejects every call
//!   that is not in `Whitelist`;
//! - pallets wired to it through [`pallet_traits::EmergencyShutdown`] refuse to mutate
//!   their state.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use frame_support::{dispatch::DispatchResult, ensure, traits::Contains};
use frame_system::pallet_prelude::OriginFor;
use pallet_traits::EmergencyShutdown;

#[cfg(test)]
mod mock;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// This can be used by the runtime to define which calls should be allowed in an emergency shutdown state.
        type Whitelist: Contains<Self::RuntimeCall>;

        /// The origin which can shutdown.
        type ShutdownOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The flag is already in the requested state
        DuplicateOperation,
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub (crate) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Shutdown flag turned on
        Paused,
        /// Shutdown flag turned off
        Unpaused,
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    /// Represent shutdown flag
    #[pallet::storage]
    #[pallet::getter(fn is_paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Turn the shutdown flag on
        #[pallet::call_index(0)]
        #[pallet::weight(T::DbWeight::get().reads_writes(1, 1))]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            T::ShutdownOrigin::ensure_origin(origin)?;
            Self::set_paused(true)?;
            Self::deposit_event(Event::Paused);
            Ok(())
        }

        /// Turn the shutdown flag off
        #[pallet::call_index(1)]
        #[pallet::weight(T::DbWeight::get().reads_writes(1, 1))]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            T::ShutdownOrigin::ensure_origin(origin)?;
            Self::set_paused(false)?;
            Self::deposit_event(Event::Unpaused);
            Ok(())
        }
    }
}

impl<T: Config> Pallet<T> {
    fn set_paused(paused: bool) -> DispatchResult {
        Paused::<T>::try_mutate(|flag| -> DispatchResult {
            ensure!(*flag != paused, Error::<T>::DuplicateOperation);
            *flag = paused;
            log::debug!(
                target: "runtime::emergency-shutdown",
                "shutdown flag set to {:?}",
                paused,
            );
            Ok(())
        })
    }
}

impl<T: Config> Contains<T::RuntimeCall> for Pallet<T> {
    fn contains(call: &T::RuntimeCall) -> bool {
        !Self::is_paused() || T::Whitelist::contains(call)
    }
}

impl<T: Config> EmergencyShutdown for Pallet<T> {
    fn is_shut_down() -> bool {
        Self::is_paused()
    }
}
