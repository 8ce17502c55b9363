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

use frame_support::{
    construct_runtime, parameter_types,
    traits::{AsEnsureOriginWithArg, Everything, GenesisBuild},
    PalletId,
};
use frame_system::{EnsureRoot, EnsureSigned};
use sp_core::H256;
use sp_runtime::{testing::Header, traits::IdentityLookup};

pub use primitives::tokens::{DOT, KSM, USDT};

type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
    pub enum Test where
        Block = Block,
        NodeBlock = Block,
        UncheckedExtrinsic = UncheckedExtrinsic,
    {
        System: frame_system::{Pallet, Call, Storage, Config, Event<T>},
        Balances: pallet_balances::{Pallet, Call, Storage, Event<T>},
        TimestampPallet: pallet_timestamp::{Pallet, Call, Storage, Inherent},
        Assets: pallet_assets::{Pallet, Call, Storage, Event<T>},
        EmergencyShutdown: pallet_emergency_shutdown::{Pallet, Call, Storage, Event<T>},
        Ledger: crate::{Pallet, Call, Storage, Config, Event<T>},
    }
);

parameter_types! {
    pub const BlockHashCount: u64 = 250;
    pub const SS58Prefix: u8 = 42;
}

impl frame_system::Config for Test {
    type BaseCallFilter = Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Index = u64;
    type BlockNumber = u64;
    type Hash = H256;
    type Hashing = ::sp_runtime::traits::BlakeTwo256;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Header = Header;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = BlockHashCount;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<Balance>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = SS58Prefix;
    type OnSetCode = ();
    type MaxConsumers = frame_support::traits::ConstU32<16>;
}

pub type AccountId = u64;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
// Holds no assets
pub const DAVE: AccountId = 4;

parameter_types! {
    pub const MinimumPeriod: u64 = 5;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = MinimumPeriod;
    type WeightInfo = ();
}

parameter_types! {
    pub const ExistentialDeposit: Balance = 1;
    pub const MaxLocks: u32 = 50;
}

impl pallet_balances::Config for Test {
    type Balance = Balance;
    type DustRemoval = ();
    type RuntimeEvent = RuntimeEvent;
    type ExistentialDeposit = ExistentialDeposit;
    type AccountStore = System;
    type WeightInfo = ();
    type MaxLocks = MaxLocks;
    type MaxReserves = ();
    type ReserveIdentifier = [u8; 8];
}

parameter_types! {
    pub const AssetDeposit: Balance = 1;
    pub const ApprovalDeposit: Balance = 1;
    pub const AssetAccountDeposit: Balance = 1;
    pub const AssetsStringLimit: u32 = 50;
    pub const MetadataDepositBase: Balance = 1;
    pub const MetadataDepositPerByte: Balance = 1;
}

impl pallet_assets::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Balance = Balance;
    type AssetId = CurrencyId;
    type AssetIdParameter = codec::Compact<CurrencyId>;
    type Currency = Balances;
    type CreateOrigin = AsEnsureOriginWithArg<EnsureSigned<AccountId>>;
    type ForceOrigin = EnsureRoot<AccountId>;
    type AssetDeposit = AssetDeposit;
    type MetadataDepositBase = MetadataDepositBase;
    type MetadataDepositPerByte = MetadataDepositPerByte;
    type AssetAccountDeposit = AssetAccountDeposit;
    type ApprovalDeposit = ApprovalDeposit;
    type StringLimit = AssetsStringLimit;
    type Freezer = ();
    type WeightInfo = ();
    type Extra = ();
    type RemoveItemsLimit = frame_support::traits::ConstU32<1000>;
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper = ();
}

impl pallet_emergency_shutdown::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Whitelist = Everything;
    type ShutdownOrigin = EnsureRoot<AccountId>;
}

parameter_types! {
    pub const LedgerPalletId: PalletId = PalletId(*b"par/ledg");
    pub const MarketNameLimit: u32 = 32;
    pub const MaxMarkets: u32 = 8;
}

impl Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Assets = Assets;
    type PalletId = LedgerPalletId;
    type StringLimit = MarketNameLimit;
    type MaxMarkets = MaxMarkets;
    type UnixTime = TimestampPallet;
    type UpdateOrigin = EnsureRoot<AccountId>;
    type FeederOrigin = EnsureRoot<AccountId>;
    type EmergencyShutdown = EmergencyShutdown;
    type WeightInfo = ();
}

pub const KSM_MARKET: &[u8] = b"KSM";
pub const USDT_MARKET: &[u8] = b"USDT";
pub const DOT_MARKET: &[u8] = b"DOT";

/// KSM: supply cap 2000, borrow cap 500, ltv 50%, price 2000
pub fn ksm_market() -> MarketId<Test> {
    Ledger::market_id(KSM_MARKET, KSM)
}

/// USDT: supply cap 1_000_000, borrow cap 500_000, ltv 90%, price 1
pub fn usdt_market() -> MarketId<Test> {
    Ledger::market_id(USDT_MARKET, USDT)
}

/// DOT: not usable as collateral, price 5
pub fn dot_market() -> MarketId<Test> {
    Ledger::market_id(DOT_MARKET, DOT)
}

pub fn unit(d: u128) -> u128 {
    d.saturating_mul(10_u128.pow(18))
}

pub const INITIAL_ASSETS: u128 = 1_000_000;

pub fn asset_balance(asset: CurrencyId, who: &AccountId) -> Balance {
    <Assets as Inspect<AccountId>>::balance(asset, who)
}

/// Checks the market level invariants of every listed market.
pub fn assert_markets_consistent() {
    for (market_id, market) in Markets::<Test>::iter() {
        assert!(market.is_consistent(), "{:?} is inconsistent: {:?}", market_id, market);
    }
}

pub(crate) fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::default()
        .build_storage::<Test>()
        .unwrap();

    GenesisBuild::<Test>::assimilate_storage(
        &crate::GenesisConfig {
            markets: vec![
                (KSM_MARKET.to_vec(), KSM, unit(2_000), unit(500), 5_000, 2_000),
                (USDT_MARKET.to_vec(), USDT, unit(1_000_000), unit(500_000), 9_000, 1),
                (DOT_MARKET.to_vec(), DOT, unit(100_000), unit(50_000), 0, 5),
            ],
        },
        &mut t,
    )
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        for asset in [KSM, USDT, DOT] {
            Assets::force_create(RuntimeOrigin::root(), asset.into(), ALICE, true, 1).unwrap();
            for who in [ALICE, BOB, CHARLIE] {
                Assets::mint(
                    RuntimeOrigin::signed(ALICE),
                    asset.into(),
                    who,
                    unit(INITIAL_ASSETS),
                )
                .unwrap();
            }
        }

        System::set_block_number(1);
        TimestampPallet::set_timestamp(6000);
    });
    ext
}
