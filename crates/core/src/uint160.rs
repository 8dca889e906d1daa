// Copyright (C) 2015-2025 The Neo Project.
//
// uint160.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! 160-bit hash used for script hashes and account identifiers.

use crate::error::{CoreError, CoreResult};
use crate::hashing::{hash160, hash256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const UINT160_SIZE: usize = 20;

/// Address version byte used by Neo N3 networks.
pub const ADDRESS_VERSION: u8 = 0x35;

/// A 160-bit value stored little-endian, as it appears in scripts and on the wire.
///
/// The string form is the byte-reversed hex with a `0x` prefix.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    pub const fn zero() -> Self {
        Self([0; UINT160_SIZE])
    }

    pub fn from_bytes(value: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; UINT160_SIZE] = value.try_into().map_err(|_| {
            CoreError::invalid_format(format!(
                "UInt160 needs {UINT160_SIZE} bytes, got {}",
                value.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn to_array(&self) -> [u8; UINT160_SIZE] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Script hash of a verification or deployment script.
    pub fn from_script(script: &[u8]) -> Self {
        Self(hash160(script))
    }

    /// Parses the reversed-hex form, with or without the `0x` prefix.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        if hex_part.len() != UINT160_SIZE * 2 {
            return Err(CoreError::invalid_format(format!("invalid UInt160 string: {s}")));
        }
        let mut bytes = hex::decode(hex_part)
            .map_err(|e| CoreError::invalid_format(format!("invalid UInt160 hex {s}: {e}")))?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }

    pub fn to_address(&self, version: u8) -> String {
        let mut data = Vec::with_capacity(25);
        data.push(version);
        data.extend_from_slice(&self.0);
        let checksum = hash256(&data);
        data.extend_from_slice(&checksum[..4]);
        bs58::encode(data).into_string()
    }

    pub fn from_address(address: &str, version: u8) -> CoreResult<Self> {
        let decoded = bs58::decode(address)
            .into_vec()
            .map_err(|_| CoreError::invalid_format("invalid Base58 address"))?;
        if decoded.len() != 25 {
            return Err(CoreError::invalid_format("invalid address length"));
        }
        if decoded[0] != version {
            return Err(CoreError::invalid_format(format!(
                "invalid address version {}",
                decoded[0]
            )));
        }
        let checksum = hash256(&decoded[..21]);
        if decoded[21..] != checksum[..4] {
            return Err(CoreError::invalid_format("invalid address checksum"));
        }
        Self::from_bytes(&decoded[1..21])
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for UInt160 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(value: [u8; UINT160_SIZE]) -> Self {
        Self(value)
    }
}

impl Serialize for UInt160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UInt160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
