// Copyright (C) 2015-2025 The Neo Project.
//
// witness.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witnesses: invocation and verification script pairs.

use crate::io::{get_var_bytes_size, BinaryWriter, Serializable};
use crate::uint160::UInt160;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    /// Hash of the verification script, if any.
    pub fn script_hash(&self) -> Option<UInt160> {
        (!self.verification_script.is_empty())
            .then(|| UInt160::from_script(&self.verification_script))
    }
}

impl Serializable for Witness {
    fn size(&self) -> usize {
        get_var_bytes_size(&self.invocation_script) + get_var_bytes_size(&self.verification_script)
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
    }
}

#[derive(Serialize, Deserialize)]
struct WitnessJson {
    invocation: String,
    verification: String,
}

impl Serialize for Witness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WitnessJson {
            invocation: STANDARD.encode(&self.invocation_script),
            verification: STANDARD.encode(&self.verification_script),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Witness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = WitnessJson::deserialize(deserializer)?;
        let decode = |s: &str| STANDARD.decode(s).map_err(serde::de::Error::custom);
        Ok(Witness {
            invocation_script: decode(&raw.invocation)?,
            verification_script: decode(&raw.verification)?,
        })
    }
}
