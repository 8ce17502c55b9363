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

use std::sync::Arc;

use codec::Codec;
use jsonrpsee::{
    core::RpcResult,
    proc_macros::rpc,
    types::error::{CallError, ErrorObject},
};
pub use pallet_collateral_ledger_rpc_runtime_api::CollateralLedgerApi as CollateralLedgerRuntimeApi;
use primitives::{CurrencyId, Valuation};
use serde::{Deserialize, Serialize};
use sp_api::ProvideRuntimeApi;
use sp_blockchain::HeaderBackend;
use sp_core::Bytes;
use sp_rpc::number::NumberOrHex;
use sp_runtime::traits::Block as BlockT;

/// [`Valuation`] with every USD value as [`NumberOrHex`].
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcValuation {
    pub total_collateral: NumberOrHex,
    pub usable_collateral: NumberOrHex,
    pub total_borrowed: NumberOrHex,
}

impl From<Valuation> for RpcValuation {
    fn from(valuation: Valuation) -> Self {
        Self {
            total_collateral: into_number_or_hex(valuation.total_collateral),
            usable_collateral: into_number_or_hex(valuation.usable_collateral),
            total_borrowed: into_number_or_hex(valuation.total_borrowed),
        }
    }
}

#[rpc(client, server)]
pub trait CollateralLedgerApi<BlockHash, AccountId, MarketId> {
    #[method(name = "ledger_marketId")]
    fn market_id(
        &self,
        name: Bytes,
        asset: CurrencyId,
        at: Option<BlockHash>,
    ) -> RpcResult<MarketId>;

    #[method(name = "ledger_suppliedBalance")]
    fn supplied_balance(
        &self,
        account: AccountId,
        market_id: MarketId,
        at: Option<BlockHash>,
    ) -> RpcResult<NumberOrHex>;

    #[method(name = "ledger_borrowedBalance")]
    fn borrowed_balance(
        &self,
        account: AccountId,
        market_id: MarketId,
        at: Option<BlockHash>,
    ) -> RpcResult<NumberOrHex>;

    #[method(name = "ledger_accountValuation")]
    fn account_valuation(
        &self,
        account: AccountId,
        at: Option<BlockHash>,
    ) -> RpcResult<RpcValuation>;

    #[method(name = "ledger_healthFactor")]
    fn health_factor(
        &self,
        account: AccountId,
        withdraw_value: NumberOrHex,
        borrow_value: NumberOrHex,
        at: Option<BlockHash>,
    ) -> RpcResult<NumberOrHex>;
}

/// A struct that implements the [`CollateralLedgerApiServer`].
pub struct CollateralLedger<C, B> {
    client: Arc<C>,
    _marker: std::marker::PhantomData<B>,
}

impl<C, B> CollateralLedger<C, B> {
    /// Create new `CollateralLedger` with the given reference to the client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            _marker: Default::default(),
        }
    }
}

pub enum Error {
    RuntimeError,
    QueryError,
}

impl From<Error> for i32 {
    fn from(e: Error) -> i32 {
        match e {
            Error::RuntimeError => 1,
            Error::QueryError => 2,
        }
    }
}

impl<C, Block, AccountId, MarketId>
    CollateralLedgerApiServer<<Block as BlockT>::Hash, AccountId, MarketId>
    for CollateralLedger<C, Block>
where
    Block: BlockT,
    C: Send + Sync + 'static,
    C: ProvideRuntimeApi<Block>,
    C: HeaderBackend<Block>,
    C::Api: CollateralLedgerRuntimeApi<Block, AccountId, MarketId>,
    AccountId: Codec,
    MarketId: Codec,
{
    fn market_id(
        &self,
        name: Bytes,
        asset: CurrencyId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<MarketId> {
        let api = self.client.runtime_api();
        // If the block hash is not supplied assume the best block.
        let at = at.unwrap_or_else(|| self.client.info().best_hash);
        api.market_id(at, name.to_vec(), asset)
            .map_err(runtime_error_into_rpc_error)
    }

    fn supplied_balance(
        &self,
        account: AccountId,
        market_id: MarketId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<NumberOrHex> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);
        api.supplied_balance(at, account, market_id)
            .map(into_number_or_hex)
            .map_err(runtime_error_into_rpc_error)
    }

    fn borrowed_balance(
        &self,
        account: AccountId,
        market_id: MarketId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<NumberOrHex> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);
        api.borrowed_balance(at, account, market_id)
            .map(into_number_or_hex)
            .map_err(runtime_error_into_rpc_error)
    }

    fn account_valuation(
        &self,
        account: AccountId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<RpcValuation> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);
        api.account_valuation(at, account)
            .map_err(runtime_error_into_rpc_error)?
            .map(Into::into)
            .map_err(query_error_into_rpc_error)
    }

    fn health_factor(
        &self,
        account: AccountId,
        withdraw_value: NumberOrHex,
        borrow_value: NumberOrHex,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<NumberOrHex> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);
        let withdraw_value = try_into_u128(withdraw_value)?;
        let borrow_value = try_into_u128(borrow_value)?;
        api.health_factor(at, account, withdraw_value, borrow_value)
            .map_err(runtime_error_into_rpc_error)?
            .map(into_number_or_hex)
            .map_err(query_error_into_rpc_error)
    }
}

fn into_number_or_hex(value: u128) -> NumberOrHex {
    NumberOrHex::Hex(value.into())
}

fn try_into_u128(value: NumberOrHex) -> RpcResult<u128> {
    let value = value.into_u256();
    u128::try_from(value).map_err(|_| {
        CallError::Custom(ErrorObject::owned(
            Error::QueryError.into(),
            format!("{} doesn't fit in u128", value),
            None::<()>,
        ))
        .into()
    })
}

/// Converts a runtime trap into an RPC error.
fn runtime_error_into_rpc_error(err: impl std::fmt::Debug) -> jsonrpsee::core::Error {
    CallError::Custom(ErrorObject::owned(
        Error::RuntimeError.into(),
        "Runtime trapped",
        Some(format!("{:?}", err)),
    ))
    .into()
}

/// Converts a failed ledger query into an RPC error.
fn query_error_into_rpc_error(err: impl std::fmt::Debug) -> jsonrpsee::core::Error {
    CallError::Custom(ErrorObject::owned(
        Error::QueryError.into(),
        "Not able to query the ledger",
        Some(format!("{:?}", err)),
    ))
    .into()
}
