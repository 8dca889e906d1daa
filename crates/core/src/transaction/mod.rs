// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Neo N3 transactions.

mod attributes;

pub use attributes::{OracleResponseCode, TransactionAttribute, TransactionAttributeType};

use crate::error::{CoreError, CoreResult};
use crate::hashing::sha256;
use crate::io::{get_var_bytes_size, get_var_list_size, BinaryWriter, Serializable};
use crate::signer::Signer;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use crate::witness::Witness;
use std::collections::HashSet;

pub const MAX_TRANSACTION_SIZE: usize = 102_400;
pub const MAX_TRANSACTION_ATTRIBUTES: usize = 16;

/// Version, nonce, system fee, network fee and valid-until-block.
pub const HEADER_SIZE: usize = 1 + 4 + 8 + 8 + 4;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub version: u8,
    pub nonce: u32,
    pub system_fee: i64,
    pub network_fee: i64,
    pub valid_until_block: u32,
    pub signers: Vec<Signer>,
    pub attributes: Vec<TransactionAttribute>,
    pub script: Vec<u8>,
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    /// Creates an unsigned draft with a random nonce and no fees.
    pub fn new(script: Vec<u8>, signers: Vec<Signer>) -> Self {
        Self {
            nonce: rand::random(),
            signers,
            script,
            ..Default::default()
        }
    }

    /// The paying account: the first signer.
    pub fn sender(&self) -> Option<UInt160> {
        self.signers.first().map(|s| s.account)
    }

    pub fn serialize_unsigned(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.version);
        writer.write_u32(self.nonce);
        writer.write_i64(self.system_fee);
        writer.write_i64(self.network_fee);
        writer.write_u32(self.valid_until_block);
        writer.write_serializable_list(&self.signers);
        writer.write_serializable_list(&self.attributes);
        writer.write_var_bytes(&self.script);
    }

    pub fn unsigned_size(&self) -> usize {
        HEADER_SIZE
            + get_var_list_size(&self.signers)
            + get_var_list_size(&self.attributes)
            + get_var_bytes_size(&self.script)
    }

    pub fn hash_data(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.unsigned_size());
        self.serialize_unsigned(&mut writer);
        writer.into_bytes()
    }

    /// SHA-256 of the unsigned encoding.
    pub fn hash(&self) -> UInt256 {
        UInt256::from(sha256(&self.hash_data()))
    }

    /// The message a witness signs: network magic followed by the hash.
    pub fn sign_data(&self, network: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + 32);
        data.extend_from_slice(&network.to_le_bytes());
        data.extend_from_slice(self.hash().as_bytes());
        data
    }

    /// Structural checks the node would reject a transaction for.
    pub fn validate(&self) -> CoreResult<()> {
        if self.signers.is_empty() {
            return Err(CoreError::invalid_data("transaction has no signers"));
        }
        let mut seen = HashSet::new();
        for signer in &self.signers {
            if !seen.insert(signer.account) {
                return Err(CoreError::invalid_data(format!(
                    "duplicate signer {}",
                    signer.account
                )));
            }
            signer.validate()?;
        }
        if self.attributes.len() + self.signers.len() > MAX_TRANSACTION_ATTRIBUTES {
            return Err(CoreError::invalid_data("too many signers and attributes"));
        }
        let mut types = HashSet::new();
        for attribute in &self.attributes {
            if !types.insert(attribute.attribute_type()) && !attribute.allow_multiple() {
                return Err(CoreError::invalid_data(format!(
                    "duplicate {:?} attribute",
                    attribute.attribute_type()
                )));
            }
        }
        if self.script.is_empty() {
            return Err(CoreError::invalid_data("transaction script is empty"));
        }
        if self.size() > MAX_TRANSACTION_SIZE {
            return Err(CoreError::invalid_data(format!(
                "transaction size {} exceeds {MAX_TRANSACTION_SIZE}",
                self.size()
            )));
        }
        Ok(())
    }
}

impl Serializable for Transaction {
    fn size(&self) -> usize {
        self.unsigned_size() + get_var_list_size(&self.witnesses)
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        self.serialize_unsigned(writer);
        writer.write_serializable_list(&self.witnesses);
    }
}
