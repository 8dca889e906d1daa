// Copyright (C) 2015-2025 The Neo Project.
//
// nns.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Name service (NNS) contract helpers.

use crate::error::{ClientRpcError, ClientResult};
use crate::iterator::{IteratorHandle, ResultIterator};
use crate::models::StackItem;
use crate::rpc_client::RpcClient;
use crate::transaction_manager::{TransactionManager, WitnessSource};
use crate::transaction_manager_factory::{TransactionManagerFactory, TransactionOptions};
use crate::unwrap::{self, FromStackItem};
use neo_core::smart_contract::create_asserted_call_script;
use neo_core::{ContractParameter, UInt160};
use num_bigint::BigInt;

pub const MAX_LABEL_LENGTH: usize = 63;
pub const MAX_NAME_LENGTH: usize = 255;
const INVALID_NAME: &str = "invalid domain name format";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordType {
    A = 1,
    CNAME = 5,
    TXT = 16,
    AAAA = 28,
}

impl TryFrom<i64> for RecordType {
    type Error = ClientRpcError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RecordType::A),
            5 => Ok(RecordType::CNAME),
            16 => Ok(RecordType::TXT),
            28 => Ok(RecordType::AAAA),
            other => Err(ClientRpcError::decode(
                "record type",
                format!("unknown type {other}"),
            )),
        }
    }
}

impl FromStackItem for RecordType {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        RecordType::try_from(item.as_i64()?)
    }
}

/// One record of a domain, as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordState {
    pub name: String,
    pub record_type: RecordType,
    pub data: String,
}

impl FromStackItem for RecordState {
    fn from_stack_item(item: StackItem) -> ClientResult<Self> {
        let fields = item.into_array()?;
        let [name, record_type, data]: [StackItem; 3] = fields.try_into().map_err(
            |fields: Vec<StackItem>| {
                ClientRpcError::decode("record state", format!("{} fields, want 3", fields.len()))
            },
        )?;
        Ok(RecordState {
            name: name.as_utf8_string()?,
            record_type: RecordType::from_stack_item(record_type)?,
            data: data.as_utf8_string()?,
        })
    }
}

fn is_valid_label(label: &str, top_level: bool) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    if bytes.len() > MAX_LABEL_LENGTH {
        return false;
    }
    if top_level {
        return first.is_ascii_lowercase()
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    }
    let edge = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    edge(first)
        && edge(last)
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Checks `name` against the contract's domain rules: at least two dot
/// separated labels of 1 to 63 characters each.
pub fn validate_name(name: &str) -> ClientResult<()> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(ClientRpcError::InvalidArgument(INVALID_NAME.to_string()));
    }
    let labels: Vec<&str> = name.split('.').collect();
    let valid = labels.len() >= 2
        && labels
            .iter()
            .enumerate()
            .all(|(i, label)| is_valid_label(label, i == labels.len() - 1));
    if valid {
        Ok(())
    } else {
        Err(ClientRpcError::InvalidArgument(INVALID_NAME.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct NnsApi {
    client: RpcClient,
    contract: UInt160,
}

impl NnsApi {
    pub fn new(client: RpcClient, contract: UInt160) -> Self {
        Self { client, contract }
    }

    pub fn contract(&self) -> &UInt160 {
        &self.contract
    }

    pub async fn is_available(&self, name: &str) -> ClientResult<bool> {
        unwrap::boolean(
            self.client
                .invoke_function(
                    &self.contract,
                    "isAvailable",
                    &[ContractParameter::String(name.to_string())],
                    &[],
                )
                .await,
        )
        .map_err(|e| e.with_context(format!("isAvailable({name})")))
    }

    pub async fn resolve(&self, name: &str, record_type: RecordType) -> ClientResult<String> {
        let args = [
            ContractParameter::String(name.to_string()),
            ContractParameter::Integer(BigInt::from(record_type as u8)),
        ];
        unwrap::utf8_string(
            self.client
                .invoke_function(&self.contract, "resolve", &args, &[])
                .await,
        )
        .map_err(|e| e.with_context(format!("resolve({name}, {record_type:?})")))
    }

    /// Every record of `name`; the session, if any, is the caller's to terminate.
    pub async fn get_all_records(&self, name: &str) -> ClientResult<ResultIterator<RecordState>> {
        let result = self
            .client
            .invoke_function(
                &self.contract,
                "getAllRecords",
                &[ContractParameter::String(name.to_string())],
                &[],
            )
            .await?;
        let handle = IteratorHandle::from_result(&result)
            .map_err(|e| e.with_context(format!("getAllRecords({name})")))?;
        Ok(ResultIterator::new(
            self.client.clone(),
            handle,
            self.client.iterator_page_size(),
        ))
    }

    /// A script registering `name` to `owner`, failing unless the contract accepts it.
    pub fn register_script(&self, name: &str, owner: &UInt160) -> ClientResult<Vec<u8>> {
        validate_name(name)?;
        Ok(create_asserted_call_script(
            &self.contract,
            "register",
            &[
                ContractParameter::String(name.to_string()),
                ContractParameter::Hash160(*owner),
            ],
        )?)
    }

    /// A fee-complete registration transaction sent by `owner`.
    pub async fn register(
        &self,
        name: &str,
        owner: WitnessSource,
        options: TransactionOptions,
    ) -> ClientResult<TransactionManager> {
        let account = owner.account().ok_or_else(|| {
            ClientRpcError::InvalidArgument("domain owner must be an account".to_string())
        })?;
        let script = self.register_script(name, &account)?;
        TransactionManagerFactory::new(self.client.clone())
            .make_transaction(script, owner, Vec::new(), options)
            .await
    }
}
