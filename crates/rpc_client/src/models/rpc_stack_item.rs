// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_stack_item.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Stack items as returned by test invocations.

use super::common::{decode_base64, encode_base64};
use crate::error::{ClientRpcError, ClientResult};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Integers wider than this are not VM integers.
const MAX_INTEGER_SIZE: usize = 32;

/// The payload of an `InteropInterface` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteropValue {
    /// An iterator kept alive in a node session.
    Iterator(Uuid),
    /// An iterator the node expanded inline because sessions are disabled.
    Inline { values: Vec<StackItem>, truncated: bool },
    /// Any other interop object; it has no JSON representation.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Any,
    Pointer(i64),
    Boolean(bool),
    Integer(BigInt),
    ByteString(Vec<u8>),
    Buffer(Vec<u8>),
    Array(Vec<StackItem>),
    Struct(Vec<StackItem>),
    Map(Vec<(StackItem, StackItem)>),
    InteropInterface(InteropValue),
}

impl StackItem {
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Any => "Any",
            StackItem::Pointer(_) => "Pointer",
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteString(_) => "ByteString",
            StackItem::Buffer(_) => "Buffer",
            StackItem::Array(_) => "Array",
            StackItem::Struct(_) => "Struct",
            StackItem::Map(_) => "Map",
            StackItem::InteropInterface(_) => "InteropInterface",
        }
    }

    fn mismatch(&self, expected: &str) -> ClientRpcError {
        ClientRpcError::decode(
            "stack item",
            format!("expected {expected}, found {}", self.type_name()),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StackItem::Any)
    }

    pub fn as_bool(&self) -> ClientResult<bool> {
        match self {
            StackItem::Boolean(value) => Ok(*value),
            StackItem::Integer(value) => Ok(!value.is_zero()),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes)
                if bytes.len() <= MAX_INTEGER_SIZE =>
            {
                Ok(bytes.iter().any(|b| *b != 0))
            }
            other => Err(other.mismatch("Boolean")),
        }
    }

    pub fn as_big_int(&self) -> ClientResult<BigInt> {
        match self {
            StackItem::Integer(value) => Ok(value.clone()),
            StackItem::Boolean(value) => Ok(BigInt::from(u8::from(*value))),
            StackItem::ByteString(bytes) if bytes.len() <= MAX_INTEGER_SIZE => {
                Ok(BigInt::from_signed_bytes_le(bytes))
            }
            other => Err(other.mismatch("Integer")),
        }
    }

    pub fn as_i64(&self) -> ClientResult<i64> {
        let value = self.as_big_int()?;
        value
            .to_i64()
            .ok_or_else(|| ClientRpcError::decode("stack item", format!("{value} overflows i64")))
    }

    pub fn as_bytes(&self) -> ClientResult<Vec<u8>> {
        match self {
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => Ok(bytes.clone()),
            StackItem::Integer(value) if value.is_zero() => Ok(Vec::new()),
            StackItem::Integer(value) => Ok(value.to_signed_bytes_le()),
            StackItem::Boolean(value) => Ok(vec![u8::from(*value)]),
            other => Err(other.mismatch("ByteString")),
        }
    }

    pub fn as_utf8_string(&self) -> ClientResult<String> {
        String::from_utf8(self.as_bytes()?)
            .map_err(|e| ClientRpcError::decode("stack item", format!("invalid UTF-8: {e}")))
    }

    /// Elements of an `Array` or `Struct`.
    pub fn as_array(&self) -> ClientResult<&[StackItem]> {
        match self {
            StackItem::Array(items) | StackItem::Struct(items) => Ok(items),
            other => Err(other.mismatch("Array")),
        }
    }

    pub fn into_array(self) -> ClientResult<Vec<StackItem>> {
        match self {
            StackItem::Array(items) | StackItem::Struct(items) => Ok(items),
            other => Err(other.mismatch("Array")),
        }
    }

    pub fn as_map(&self) -> ClientResult<&[(StackItem, StackItem)]> {
        match self {
            StackItem::Map(entries) => Ok(entries),
            other => Err(other.mismatch("Map")),
        }
    }

    pub fn as_interop(&self) -> ClientResult<&InteropValue> {
        match self {
            StackItem::InteropInterface(value) => Ok(value),
            other => Err(other.mismatch("InteropInterface")),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::from(self.type_name()));
        let value = match self {
            StackItem::Any => None,
            StackItem::Pointer(position) => Some(Value::from(*position)),
            StackItem::Boolean(value) => Some(Value::from(*value)),
            StackItem::Integer(value) => Some(Value::from(value.to_string())),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => {
                Some(Value::from(encode_base64(bytes)))
            }
            StackItem::Array(items) | StackItem::Struct(items) => {
                Some(Value::Array(items.iter().map(StackItem::to_json).collect()))
            }
            StackItem::Map(entries) => Some(Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!({"key": k.to_json(), "value": v.to_json()}))
                    .collect(),
            )),
            StackItem::InteropInterface(InteropValue::Iterator(id)) => {
                object.insert("interface".to_string(), Value::from("IIterator"));
                object.insert("id".to_string(), Value::from(id.to_string()));
                None
            }
            StackItem::InteropInterface(InteropValue::Inline { values, truncated }) => {
                object.insert(
                    "iterator".to_string(),
                    Value::Array(values.iter().map(StackItem::to_json).collect()),
                );
                object.insert("truncated".to_string(), Value::from(*truncated));
                None
            }
            StackItem::InteropInterface(InteropValue::Opaque) => None,
        };
        if let Some(value) = value {
            object.insert("value".to_string(), value);
        }
        Value::Object(object)
    }

    /// Decodes the `{"type", "value"}` form, dispatching on the tag first.
    pub fn from_json(json: &Value) -> Result<Self, String> {
        let kind = json
            .get("type")
            .and_then(Value::as_str)
            .ok_or("stack item has no type")?;
        let value = json.get("value");
        let need = |what: &str| format!("{kind} item has no {what} value");
        match kind {
            "Any" => Ok(StackItem::Any),
            "Pointer" => value
                .and_then(Value::as_i64)
                .map(StackItem::Pointer)
                .ok_or_else(|| need("numeric")),
            "Boolean" => value
                .and_then(Value::as_bool)
                .map(StackItem::Boolean)
                .ok_or_else(|| need("boolean")),
            "Integer" => {
                let text = match value {
                    Some(Value::String(text)) => text.clone(),
                    Some(Value::Number(number)) => number.to_string(),
                    _ => return Err(need("integer")),
                };
                text.parse::<BigInt>()
                    .map(StackItem::Integer)
                    .map_err(|e| format!("invalid integer {text}: {e}"))
            }
            "ByteString" | "Buffer" => {
                let text = value.and_then(Value::as_str).ok_or_else(|| need("base64"))?;
                let bytes = decode_base64(text).map_err(|e| format!("invalid base64: {e}"))?;
                Ok(if kind == "Buffer" {
                    StackItem::Buffer(bytes)
                } else {
                    StackItem::ByteString(bytes)
                })
            }
            "Array" | "Struct" => {
                let items = decode_list(value.ok_or_else(|| need("array"))?)?;
                Ok(if kind == "Struct" {
                    StackItem::Struct(items)
                } else {
                    StackItem::Array(items)
                })
            }
            "Map" => {
                let entries = value
                    .and_then(Value::as_array)
                    .ok_or_else(|| need("array"))?
                    .iter()
                    .map(|entry| {
                        let key = entry.get("key").ok_or("map entry has no key")?;
                        let value = entry.get("value").ok_or("map entry has no value")?;
                        Ok((StackItem::from_json(key)?, StackItem::from_json(value)?))
                    })
                    .collect::<Result<Vec<_>, String>>()?;
                Ok(StackItem::Map(entries))
            }
            "InteropInterface" => decode_interop(json).map(StackItem::InteropInterface),
            other => Err(format!("unknown stack item type {other}")),
        }
    }
}

fn decode_list(value: &Value) -> Result<Vec<StackItem>, String> {
    value
        .as_array()
        .ok_or("expected an array of stack items")?
        .iter()
        .map(StackItem::from_json)
        .collect()
}

fn decode_interop(json: &Value) -> Result<InteropValue, String> {
    if let Some(id) = json.get("id").and_then(Value::as_str) {
        if let Some(interface) = json.get("interface").and_then(Value::as_str) {
            if interface != "IIterator" {
                return Err(format!("unsupported interop interface {interface}"));
            }
        }
        let id = Uuid::parse_str(id).map_err(|e| format!("invalid iterator id {id}: {e}"))?;
        return Ok(InteropValue::Iterator(id));
    }
    let inline = json.get("iterator").or_else(|| json.get("value"));
    match inline {
        Some(values) if values.is_array() => Ok(InteropValue::Inline {
            values: decode_list(values)?,
            truncated: json.get("truncated").and_then(Value::as_bool).unwrap_or(false),
        }),
        _ => Ok(InteropValue::Opaque),
    }
}

impl Serialize for StackItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StackItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Value::deserialize(deserializer)?;
        StackItem::from_json(&json).map_err(de::Error::custom)
    }
}

impl From<bool> for StackItem {
    fn from(value: bool) -> Self {
        StackItem::Boolean(value)
    }
}

impl From<i64> for StackItem {
    fn from(value: i64) -> Self {
        StackItem::Integer(BigInt::from(value))
    }
}

impl From<&str> for StackItem {
    fn from(value: &str) -> Self {
        StackItem::ByteString(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for StackItem {
    fn from(value: Vec<u8>) -> Self {
        StackItem::ByteString(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested() {
        let json = json!({
            "type": "Array",
            "value": [
                {"type": "Integer", "value": "-5"},
                {"type": "ByteString", "value": "aGVsbG8="},
                {"type": "Map", "value": [
                    {"key": {"type": "ByteString", "value": "YQ=="}, "value": {"type": "Boolean", "value": true}}
                ]},
                {"type": "Any"}
            ]
        });
        let item: StackItem = serde_json::from_value(json.clone()).unwrap();
        let items = item.as_array().unwrap();
        assert_eq!(items[0].as_i64().unwrap(), -5);
        assert_eq!(items[1].as_utf8_string().unwrap(), "hello");
        assert_eq!(items[2].as_map().unwrap()[0].1, StackItem::Boolean(true));
        assert!(items[3].is_null());
        assert_eq!(item.to_json(), json);
    }

    #[test]
    fn test_session_iterator() {
        let id = Uuid::new_v4();
        let json = json!({"type": "InteropInterface", "interface": "IIterator", "id": id.to_string()});
        let item = StackItem::from_json(&json).unwrap();
        assert_eq!(item, StackItem::InteropInterface(InteropValue::Iterator(id)));
        assert_eq!(item.to_json(), json);
    }

    #[test]
    fn test_inline_iterator() {
        let json = json!({
            "type": "InteropInterface",
            "iterator": [{"type": "Integer", "value": "1"}],
            "truncated": true
        });
        match StackItem::from_json(&json).unwrap() {
            StackItem::InteropInterface(InteropValue::Inline { values, truncated }) => {
                assert_eq!(values, vec![StackItem::from(1i64)]);
                assert!(truncated);
            }
            other => panic!("unexpected {other:?}"),
        }
        let opaque = StackItem::from_json(&json!({"type": "InteropInterface"})).unwrap();
        assert_eq!(opaque, StackItem::InteropInterface(InteropValue::Opaque));
    }

    #[test]
    fn test_conversions() {
        assert!(StackItem::from(vec![0, 0, 1]).as_bool().unwrap());
        assert!(!StackItem::from(vec![0, 0]).as_bool().unwrap());
        assert_eq!(StackItem::from(vec![0xff]).as_i64().unwrap(), -1);
        assert_eq!(StackItem::from(256i64).as_bytes().unwrap(), vec![0, 1]);
        assert!(StackItem::Any.as_bool().is_err());
        assert!(StackItem::from(true).as_array().is_err());
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert!(StackItem::from_json(&json!({"type": "Float", "value": 1})).is_err());
        assert!(StackItem::from_json(&json!({"type": "Integer", "value": "x"})).is_err());
    }
}
