// Copyright (C) 2015-2025 The Neo Project.
//
// contract_parameter.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed contract call arguments, as JSON for `invokefunction` and as script pushes.

use crate::ecpoint::ECPoint;
use crate::error::CoreResult;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use neo_vm::{OpCode, ScriptBuilder};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContractParameterType {
    Any = 0x00,
    Boolean = 0x10,
    Integer = 0x11,
    ByteArray = 0x12,
    String = 0x13,
    Hash160 = 0x14,
    Hash256 = 0x15,
    PublicKey = 0x16,
    Signature = 0x17,
    Array = 0x20,
    Map = 0x22,
    InteropInterface = 0x30,
    Void = 0xff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractParameter {
    Any,
    Boolean(bool),
    Integer(BigInt),
    ByteArray(Vec<u8>),
    String(String),
    Hash160(UInt160),
    Hash256(UInt256),
    PublicKey(ECPoint),
    Signature(Vec<u8>),
    Array(Vec<ContractParameter>),
    Map(Vec<(ContractParameter, ContractParameter)>),
}

impl ContractParameter {
    pub fn parameter_type(&self) -> ContractParameterType {
        match self {
            ContractParameter::Any => ContractParameterType::Any,
            ContractParameter::Boolean(_) => ContractParameterType::Boolean,
            ContractParameter::Integer(_) => ContractParameterType::Integer,
            ContractParameter::ByteArray(_) => ContractParameterType::ByteArray,
            ContractParameter::String(_) => ContractParameterType::String,
            ContractParameter::Hash160(_) => ContractParameterType::Hash160,
            ContractParameter::Hash256(_) => ContractParameterType::Hash256,
            ContractParameter::PublicKey(_) => ContractParameterType::PublicKey,
            ContractParameter::Signature(_) => ContractParameterType::Signature,
            ContractParameter::Array(_) => ContractParameterType::Array,
            ContractParameter::Map(_) => ContractParameterType::Map,
        }
    }

    pub fn to_json(&self) -> Value {
        let type_name = format!("{:?}", self.parameter_type());
        let value = match self {
            ContractParameter::Any => return json!({ "type": type_name }),
            ContractParameter::Boolean(b) => json!(b),
            ContractParameter::Integer(i) => json!(i.to_string()),
            ContractParameter::ByteArray(bytes) | ContractParameter::Signature(bytes) => {
                json!(STANDARD.encode(bytes))
            }
            ContractParameter::String(s) => json!(s),
            ContractParameter::Hash160(h) => json!(h.to_string()),
            ContractParameter::Hash256(h) => json!(h.to_string()),
            ContractParameter::PublicKey(k) => json!(k.to_hex()),
            ContractParameter::Array(items) => {
                Value::Array(items.iter().map(ContractParameter::to_json).collect())
            }
            ContractParameter::Map(entries) => Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!({ "key": k.to_json(), "value": v.to_json() }))
                    .collect(),
            ),
        };
        json!({ "type": type_name, "value": value })
    }

    /// Pushes this value onto the evaluation stack.
    pub fn emit(&self, builder: &mut ScriptBuilder) -> CoreResult<()> {
        match self {
            ContractParameter::Any => {
                builder.emit_push_null();
            }
            ContractParameter::Boolean(b) => {
                builder.emit_push_bool(*b);
            }
            ContractParameter::Integer(i) => {
                builder.emit_push_bigint(i)?;
            }
            ContractParameter::ByteArray(bytes) | ContractParameter::Signature(bytes) => {
                builder.emit_push(bytes);
            }
            ContractParameter::String(s) => {
                builder.emit_push_string(s);
            }
            ContractParameter::Hash160(h) => {
                builder.emit_push(h.as_bytes());
            }
            ContractParameter::Hash256(h) => {
                builder.emit_push(h.as_bytes());
            }
            ContractParameter::PublicKey(k) => {
                builder.emit_push(k.as_bytes());
            }
            ContractParameter::Array(items) => {
                for item in items.iter().rev() {
                    item.emit(builder)?;
                }
                builder.emit_pack(items.len());
            }
            ContractParameter::Map(entries) => {
                builder.emit_opcode(OpCode::NEWMAP);
                for (key, value) in entries {
                    builder.emit_opcode(OpCode::DUP);
                    key.emit(builder)?;
                    value.emit(builder)?;
                    builder.emit_opcode(OpCode::SETITEM);
                }
            }
        }
        Ok(())
    }
}

impl Serialize for ContractParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for ContractParameter {
    fn from(value: bool) -> Self {
        ContractParameter::Boolean(value)
    }
}

impl From<i64> for ContractParameter {
    fn from(value: i64) -> Self {
        ContractParameter::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for ContractParameter {
    fn from(value: BigInt) -> Self {
        ContractParameter::Integer(value)
    }
}

impl From<&str> for ContractParameter {
    fn from(value: &str) -> Self {
        ContractParameter::String(value.to_string())
    }
}

impl From<String> for ContractParameter {
    fn from(value: String) -> Self {
        ContractParameter::String(value)
    }
}

impl From<Vec<u8>> for ContractParameter {
    fn from(value: Vec<u8>) -> Self {
        ContractParameter::ByteArray(value)
    }
}

impl From<UInt160> for ContractParameter {
    fn from(value: UInt160) -> Self {
        ContractParameter::Hash160(value)
    }
}

impl From<UInt256> for ContractParameter {
    fn from(value: UInt256) -> Self {
        ContractParameter::Hash256(value)
    }
}

impl From<ECPoint> for ContractParameter {
    fn from(value: ECPoint) -> Self {
        ContractParameter::PublicKey(value)
    }
}

impl From<Vec<ContractParameter>> for ContractParameter {
    fn from(value: Vec<ContractParameter>) -> Self {
        ContractParameter::Array(value)
    }
}
