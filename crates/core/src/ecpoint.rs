// Copyright (C) 2015-2025 The Neo Project.
//
// ecpoint.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Compressed secp256r1 public keys as they appear in scripts and signers.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const COMPRESSED_KEY_SIZE: usize = 33;

/// A compressed public key. Only the encoding is checked, the point itself is
/// never decompressed here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ECPoint([u8; COMPRESSED_KEY_SIZE]);

impl ECPoint {
    pub fn from_bytes(value: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; COMPRESSED_KEY_SIZE] = value.try_into().map_err(|_| {
            CoreError::invalid_format(format!(
                "compressed public key needs {COMPRESSED_KEY_SIZE} bytes, got {}",
                value.len()
            ))
        })?;
        if bytes[0] != 0x02 && bytes[0] != 0x03 {
            return Err(CoreError::invalid_format(format!(
                "invalid public key prefix 0x{:02x}",
                bytes[0]
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; COMPRESSED_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECPoint({})", self.to_hex())
    }
}

impl FromStr for ECPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|e| CoreError::invalid_format(format!("invalid public key hex: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for ECPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ECPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
