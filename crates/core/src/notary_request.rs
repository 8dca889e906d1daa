// Copyright (C) 2015-2025 The Neo Project.
//
// notary_request.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! P2P notary request payloads.

use crate::hashing::sha256;
use crate::io::{BinaryWriter, Serializable};
use crate::smart_contract::contract::SIGNATURE_SIZE;
use crate::transaction::Transaction;
use crate::uint256::UInt256;
use crate::witness::Witness;
use neo_vm::OpCode;

/// The placeholder witness a fallback transaction carries for the Notary
/// contract signer: `PUSHDATA1` with 64 zero bytes and no verification script.
pub fn dummy_notary_witness() -> Witness {
    let mut invocation = Vec::with_capacity(2 + SIGNATURE_SIZE);
    invocation.push(OpCode::PUSHDATA1 as u8);
    invocation.push(SIGNATURE_SIZE as u8);
    invocation.extend_from_slice(&[0u8; SIGNATURE_SIZE]);
    Witness::new(invocation, Vec::new())
}

/// A main transaction awaiting notary signatures together with the fallback
/// the sender pays for if the main transaction never completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P2PNotaryRequest {
    pub main_transaction: Transaction,
    pub fallback_transaction: Transaction,
    pub witness: Witness,
}

impl P2PNotaryRequest {
    pub fn hash_data(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(
            self.main_transaction.size() + self.fallback_transaction.size(),
        );
        self.main_transaction.serialize(&mut writer);
        self.fallback_transaction.serialize(&mut writer);
        writer.into_bytes()
    }

    pub fn hash(&self) -> UInt256 {
        UInt256::from(sha256(&self.hash_data()))
    }

    pub fn sign_data(&self, network: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(&network.to_le_bytes());
        data.extend_from_slice(self.hash().as_bytes());
        data
    }
}

impl Serializable for P2PNotaryRequest {
    fn size(&self) -> usize {
        self.main_transaction.size() + self.fallback_transaction.size() + self.witness.size()
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        self.main_transaction.serialize(writer);
        self.fallback_transaction.serialize(writer);
        self.witness.serialize(writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::Signer;
    use crate::uint160::UInt160;

    #[test]
    fn test_dummy_witness_size() {
        let witness = dummy_notary_witness();
        assert_eq!(witness.invocation_script.len(), 66);
        assert_eq!(witness.size(), 68);
    }

    #[test]
    fn test_hash_excludes_request_witness() {
        let main = Transaction::new(vec![0x40], vec![Signer::called_by_entry(UInt160::zero())]);
        let fallback = Transaction::new(vec![0x38], vec![Signer::called_by_entry(UInt160::zero())]);
        let mut request = P2PNotaryRequest {
            main_transaction: main,
            fallback_transaction: fallback,
            witness: Witness::default(),
        };
        let hash = request.hash();
        request.witness = dummy_notary_witness();
        assert_eq!(request.hash(), hash);
        assert_eq!(request.to_array().len(), request.size());
    }
}
