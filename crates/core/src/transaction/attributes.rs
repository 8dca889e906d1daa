// Copyright (C) 2015-2025 The Neo Project.
//
// attributes.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction attributes.

use crate::io::{get_var_bytes_size, BinaryWriter, Serializable};
use crate::uint256::{UInt256, UINT256_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionAttributeType {
    HighPriority = 0x01,
    OracleResponse = 0x11,
    NotValidBefore = 0x20,
    Conflicts = 0x21,
    NotaryAssisted = 0x22,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum OracleResponseCode {
    Success = 0x00,
    ProtocolNotSupported = 0x10,
    ConsensusUnreachable = 0x12,
    NotFound = 0x14,
    Timeout = 0x16,
    Forbidden = 0x18,
    ResponseTooLarge = 0x1a,
    InsufficientFunds = 0x1c,
    ContentTypeNotSupported = 0x1f,
    Error = 0xff,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionAttribute {
    HighPriority,

    OracleResponse {
        id: u64,
        code: OracleResponseCode,
        #[serde(with = "base64_bytes")]
        result: Vec<u8>,
    },

    /// The transaction is invalid before this height.
    NotValidBefore { height: u32 },

    /// Declares a conflict with another transaction; whichever lands first wins.
    Conflicts { hash: UInt256 },

    /// Marks a transaction completed by the Notary service; `nkeys` counts
    /// the keys that will sign it.
    NotaryAssisted {
        #[serde(rename = "nkeys")]
        n_keys: u8,
    },
}

impl TransactionAttribute {
    pub fn attribute_type(&self) -> TransactionAttributeType {
        match self {
            TransactionAttribute::HighPriority => TransactionAttributeType::HighPriority,
            TransactionAttribute::OracleResponse { .. } => TransactionAttributeType::OracleResponse,
            TransactionAttribute::NotValidBefore { .. } => TransactionAttributeType::NotValidBefore,
            TransactionAttribute::Conflicts { .. } => TransactionAttributeType::Conflicts,
            TransactionAttribute::NotaryAssisted { .. } => TransactionAttributeType::NotaryAssisted,
        }
    }

    /// Whether several attributes of this type may appear in one transaction.
    pub fn allow_multiple(&self) -> bool {
        matches!(self, TransactionAttribute::Conflicts { .. })
    }
}

impl Serializable for TransactionAttribute {
    fn size(&self) -> usize {
        1 + match self {
            TransactionAttribute::HighPriority => 0,
            TransactionAttribute::OracleResponse { result, .. } => 8 + 1 + get_var_bytes_size(result),
            TransactionAttribute::NotValidBefore { .. } => 4,
            TransactionAttribute::Conflicts { .. } => UINT256_SIZE,
            TransactionAttribute::NotaryAssisted { .. } => 1,
        }
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.attribute_type() as u8);
        match self {
            TransactionAttribute::HighPriority => {}
            TransactionAttribute::OracleResponse { id, code, result } => {
                writer.write_u64(*id);
                writer.write_u8(*code as u8);
                writer.write_var_bytes(result);
            }
            TransactionAttribute::NotValidBefore { height } => writer.write_u32(*height),
            TransactionAttribute::Conflicts { hash } => writer.write_bytes(hash.as_bytes()),
            TransactionAttribute::NotaryAssisted { n_keys } => writer.write_u8(*n_keys),
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        STANDARD.decode(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodings() {
        let nvb = TransactionAttribute::NotValidBefore { height: 0x0102 };
        assert_eq!(nvb.to_array(), vec![0x20, 0x02, 0x01, 0x00, 0x00]);
        let notary = TransactionAttribute::NotaryAssisted { n_keys: 3 };
        assert_eq!(notary.to_array(), vec![0x22, 0x03]);
        let conflicts = TransactionAttribute::Conflicts { hash: UInt256::zero() };
        assert_eq!(conflicts.size(), 33);
        assert!(conflicts.allow_multiple());
        assert!(!notary.allow_multiple());
    }

    #[test]
    fn test_json_shape() {
        let notary = TransactionAttribute::NotaryAssisted { n_keys: 0 };
        assert_eq!(
            serde_json::to_value(&notary).unwrap(),
            serde_json::json!({"type": "NotaryAssisted", "nkeys": 0})
        );
        let oracle: TransactionAttribute = serde_json::from_value(serde_json::json!({
            "type": "OracleResponse", "id": 5, "code": "Success", "result": "AQI="
        }))
        .unwrap();
        assert_eq!(
            oracle,
            TransactionAttribute::OracleResponse {
                id: 5,
                code: OracleResponseCode::Success,
                result: vec![1, 2]
            }
        );
    }
}
