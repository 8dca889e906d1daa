// Copyright (C) 2015-2025 The Neo Project.
//
// nep17_api.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! NEP-17 token queries and transfer scripts.

use crate::error::{ClientRpcError, ClientResult};
use crate::rpc_client::RpcClient;
use crate::unwrap;
use neo_core::smart_contract::emit_app_call;
use neo_core::{ContractParameter, UInt160};
use neo_vm::{CallFlags, OpCode, ScriptBuilder};
use num_bigint::BigInt;

/// One leg of a batched transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub token: UInt160,
    pub to: UInt160,
    pub amount: BigInt,
    pub data: ContractParameter,
}

impl TransferParams {
    pub fn new(token: UInt160, to: UInt160, amount: impl Into<BigInt>) -> Self {
        Self {
            token,
            to,
            amount: amount.into(),
            data: ContractParameter::Any,
        }
    }

    pub fn with_data(mut self, data: ContractParameter) -> Self {
        self.data = data;
        self
    }
}

fn emit_transfer(
    sb: &mut ScriptBuilder,
    token: &UInt160,
    from: &UInt160,
    to: &UInt160,
    amount: &BigInt,
    data: &ContractParameter,
) -> ClientResult<()> {
    let args = [
        ContractParameter::Hash160(*from),
        ContractParameter::Hash160(*to),
        ContractParameter::Integer(amount.clone()),
        data.clone(),
    ];
    emit_app_call(sb, token, "transfer", CallFlags::ALL, &args)?;
    sb.emit_opcode(OpCode::ASSERT);
    Ok(())
}

/// A script transferring `amount` of `token`; it faults if the transfer returns false.
pub fn transfer_script(
    token: &UInt160,
    from: &UInt160,
    to: &UInt160,
    amount: &BigInt,
    data: &ContractParameter,
) -> ClientResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    emit_transfer(&mut sb, token, from, to, amount, data)?;
    Ok(sb.to_array()?)
}

/// Several transfers from one account in a single script, aborting at the
/// first one that fails.
pub fn multi_transfer_script(from: &UInt160, transfers: &[TransferParams]) -> ClientResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    for transfer in transfers {
        emit_transfer(
            &mut sb,
            &transfer.token,
            from,
            &transfer.to,
            &transfer.amount,
            &transfer.data,
        )?;
    }
    Ok(sb.to_array()?)
}

#[derive(Debug, Clone)]
pub struct Nep17Api {
    client: RpcClient,
}

impl Nep17Api {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    pub async fn balance_of(&self, token: &UInt160, account: &UInt160) -> ClientResult<BigInt> {
        unwrap::big_int(
            self.client
                .invoke_function(token, "balanceOf", &[ContractParameter::Hash160(*account)], &[])
                .await,
        )
        .map_err(|e| e.with_context(format!("balanceOf on {token}")))
    }

    pub async fn symbol(&self, token: &UInt160) -> ClientResult<String> {
        unwrap::utf8_string(self.client.invoke_function(token, "symbol", &[], &[]).await)
            .map_err(|e| e.with_context(format!("symbol on {token}")))
    }

    pub async fn decimals(&self, token: &UInt160) -> ClientResult<u8> {
        let decimals =
            unwrap::int64(self.client.invoke_function(token, "decimals", &[], &[]).await)
                .map_err(|e| e.with_context(format!("decimals on {token}")))?;
        u8::try_from(decimals).map_err(|_| {
            ClientRpcError::decode(format!("decimals on {token}"), "out of range")
        })
    }

    pub async fn total_supply(&self, token: &UInt160) -> ClientResult<BigInt> {
        unwrap::big_int(self.client.invoke_function(token, "totalSupply", &[], &[]).await)
            .map_err(|e| e.with_context(format!("totalSupply on {token}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::smart_contract::create_asserted_call_script;

    #[test]
    fn test_transfer_is_asserted_call() {
        let token = UInt160::from([1u8; 20]);
        let from = UInt160::from([2u8; 20]);
        let to = UInt160::from([3u8; 20]);
        let amount = BigInt::from(100);
        let script = transfer_script(&token, &from, &to, &amount, &ContractParameter::Any).unwrap();
        let expected = create_asserted_call_script(
            &token,
            "transfer",
            &[
                ContractParameter::Hash160(from),
                ContractParameter::Hash160(to),
                ContractParameter::Integer(amount),
                ContractParameter::Any,
            ],
        )
        .unwrap();
        assert_eq!(script, expected);
    }

    #[test]
    fn test_multi_transfer_concatenates_legs() {
        let from = UInt160::from([2u8; 20]);
        let legs = vec![
            TransferParams::new(UInt160::from([1u8; 20]), UInt160::from([3u8; 20]), 5),
            TransferParams::new(UInt160::from([4u8; 20]), UInt160::from([3u8; 20]), 7)
                .with_data(ContractParameter::String("memo".into())),
        ];
        let script = multi_transfer_script(&from, &legs).unwrap();
        let mut expected = Vec::new();
        for leg in &legs {
            expected.extend(
                transfer_script(&leg.token, &from, &leg.to, &leg.amount, &leg.data).unwrap(),
            );
        }
        assert_eq!(script, expected);
        let asserts = script.iter().filter(|b| **b == OpCode::ASSERT as u8).count();
        assert!(asserts >= 2);
        assert_eq!(*script.last().unwrap(), OpCode::ASSERT as u8);
    }
}
