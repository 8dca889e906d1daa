// Copyright (C) 2015-2025 The Neo Project.
//
// contract.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Standard verification scripts: single-signature and m-of-n multisignature.

use crate::ecpoint::{ECPoint, COMPRESSED_KEY_SIZE};
use crate::error::{CoreError, CoreResult};
use crate::uint160::UInt160;
use neo_vm::interop::{SYSTEM_CRYPTO_CHECKMULTISIG, SYSTEM_CRYPTO_CHECKSIG};
use neo_vm::{OpCode, ScriptBuilder};

pub const SIGNATURE_SIZE: usize = 64;
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// `PUSHDATA1 <key> SYSCALL System.Crypto.CheckSig`
pub fn create_signature_redeem_script(key: &ECPoint) -> Vec<u8> {
    let mut script = Vec::with_capacity(40);
    script.push(OpCode::PUSHDATA1 as u8);
    script.push(COMPRESSED_KEY_SIZE as u8);
    script.extend_from_slice(key.as_bytes());
    script.push(OpCode::SYSCALL as u8);
    script.extend_from_slice(&SYSTEM_CRYPTO_CHECKSIG.hash().to_le_bytes());
    script
}

/// Builds an m-of-n verification script over the keys in sorted order.
pub fn create_multisig_redeem_script(m: usize, keys: &[ECPoint]) -> CoreResult<Vec<u8>> {
    if m == 0 || m > keys.len() || keys.len() > MAX_MULTISIG_KEYS {
        return Err(CoreError::invalid_data(format!(
            "invalid multisignature threshold {m} of {}",
            keys.len()
        )));
    }
    let mut sorted = keys.to_vec();
    sorted.sort();
    let mut builder = ScriptBuilder::new();
    builder.emit_push_int(m as i64);
    for key in &sorted {
        builder.emit_push(key.as_bytes());
    }
    builder.emit_push_int(sorted.len() as i64);
    builder.emit_syscall(&SYSTEM_CRYPTO_CHECKMULTISIG);
    Ok(builder.to_array()?)
}

pub fn signature_contract_hash(key: &ECPoint) -> UInt160 {
    UInt160::from_script(&create_signature_redeem_script(key))
}

/// `PUSHDATA1 <signature>`, the invocation script matching a signature contract.
pub fn signature_invocation_script(signature: &[u8; SIGNATURE_SIZE]) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + SIGNATURE_SIZE);
    script.push(OpCode::PUSHDATA1 as u8);
    script.push(SIGNATURE_SIZE as u8);
    script.extend_from_slice(signature);
    script
}

pub fn is_signature_contract(script: &[u8]) -> bool {
    script.len() == 40
        && script[0] == OpCode::PUSHDATA1 as u8
        && script[1] == COMPRESSED_KEY_SIZE as u8
        && script[35] == OpCode::SYSCALL as u8
        && u32::from_le_bytes([script[36], script[37], script[38], script[39]])
            == SYSTEM_CRYPTO_CHECKSIG.hash()
}

pub fn is_multisig_contract(script: &[u8]) -> bool {
    parse_multisig_contract(script).is_some()
}

/// Returns the threshold and keys of an m-of-n verification script.
pub fn parse_multisig_contract(script: &[u8]) -> Option<(usize, Vec<ECPoint>)> {
    let (m, mut pos) = read_small_int(script, 0)?;
    let mut keys = Vec::new();
    while script.get(pos) == Some(&(OpCode::PUSHDATA1 as u8)) {
        if script.get(pos + 1) != Some(&(COMPRESSED_KEY_SIZE as u8)) {
            return None;
        }
        let key = script.get(pos + 2..pos + 2 + COMPRESSED_KEY_SIZE)?;
        keys.push(ECPoint::from_bytes(key).ok()?);
        pos += 2 + COMPRESSED_KEY_SIZE;
    }
    let (n, pos) = read_small_int(script, pos)?;
    if n != keys.len() || m == 0 || m > n || n > MAX_MULTISIG_KEYS {
        return None;
    }
    if script.len() != pos + 5 || script[pos] != OpCode::SYSCALL as u8 {
        return None;
    }
    let hash = u32::from_le_bytes([script[pos + 1], script[pos + 2], script[pos + 3], script[pos + 4]]);
    (hash == SYSTEM_CRYPTO_CHECKMULTISIG.hash()).then_some((m, keys))
}

fn read_small_int(script: &[u8], pos: usize) -> Option<(usize, usize)> {
    let op = OpCode::try_from(*script.get(pos)?).ok()?;
    match op {
        OpCode::PUSHINT8 => Some((*script.get(pos + 1)? as usize, pos + 2)),
        OpCode::PUSHINT16 => {
            let bytes = script.get(pos + 1..pos + 3)?;
            Some((u16::from_le_bytes([bytes[0], bytes[1]]) as usize, pos + 3))
        }
        _ if (OpCode::PUSH1..=OpCode::PUSH16).contains(&op) => {
            Some(((op as u8 - OpCode::PUSH0 as u8) as usize, pos + 1))
        }
        _ => None,
    }
}
