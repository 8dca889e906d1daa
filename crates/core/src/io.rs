// Copyright (C) 2015-2025 The Neo Project.
//
// io.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Binary encoding helpers for the Neo wire format.

use crate::ecpoint::ECPoint;
use crate::uint160::UInt160;
use crate::uint256::UInt256;

/// Types with a Neo binary encoding.
pub trait Serializable {
    /// Encoded size in bytes.
    fn size(&self) -> usize;

    fn serialize(&self, writer: &mut BinaryWriter);

    fn to_array(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize(&mut writer);
        writer.into_bytes()
    }
}

/// Size of the variable-length integer prefix for `value`.
pub fn get_var_size(value: usize) -> usize {
    if value < 0xFD {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Size of a length-prefixed byte string.
pub fn get_var_bytes_size(data: &[u8]) -> usize {
    get_var_size(data.len()) + data.len()
}

/// Size of a length-prefixed list of serializable items.
pub fn get_var_list_size<T: Serializable>(items: &[T]) -> usize {
    get_var_size(items.len()) + items.iter().map(Serializable::size).sum::<usize>()
}

#[derive(Debug, Default)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn write_var_int(&mut self, value: u64) {
        if value < 0xFD {
            self.write_u8(value as u8);
        } else if value <= 0xFFFF {
            self.write_u8(0xFD);
            self.write_u16(value as u16);
        } else if value <= 0xFFFF_FFFF {
            self.write_u8(0xFE);
            self.write_u32(value as u32);
        } else {
            self.write_u8(0xFF);
            self.write_u64(value);
        }
    }

    pub fn write_var_bytes(&mut self, data: &[u8]) {
        self.write_var_int(data.len() as u64);
        self.write_bytes(data);
    }

    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    pub fn write_serializable<T: Serializable>(&mut self, item: &T) {
        item.serialize(self);
    }

    pub fn write_serializable_list<T: Serializable>(&mut self, items: &[T]) {
        self.write_var_int(items.len() as u64);
        for item in items {
            item.serialize(self);
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Serializable for UInt160 {
    fn size(&self) -> usize {
        self.as_bytes().len()
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.as_bytes());
    }
}

impl Serializable for UInt256 {
    fn size(&self) -> usize {
        self.as_bytes().len()
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.as_bytes());
    }
}

impl Serializable for ECPoint {
    fn size(&self) -> usize {
        self.as_bytes().len()
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.as_bytes());
    }
}
