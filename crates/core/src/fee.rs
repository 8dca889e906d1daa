// Copyright (C) 2015-2025 The Neo Project.
//
// fee.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Closed-form network fee of standard witnesses.
//!
//! Prices are in the units the node charges: opcode prices times the
//! exec-fee factor read from the Policy contract.

use crate::io::get_var_size;
use crate::smart_contract::contract::{is_signature_contract, parse_multisig_contract, SIGNATURE_SIZE};
use neo_vm::{OpCode, ScriptBuilder, ECDSA_VERIFY_PRICE};

/// Size of one `PUSHDATA1 <signature>` invocation entry.
const SIGNATURE_PUSH_SIZE: usize = 2 + SIGNATURE_SIZE;

/// Sum of opcode prices scaled by the exec-fee factor.
pub fn opcode_cost(exec_fee_factor: i64, opcodes: &[OpCode]) -> i64 {
    opcodes.iter().map(|op| op.price()).sum::<i64>() * exec_fee_factor
}

/// Execution fee and witness size of a standard verification script.
///
/// Returns `None` for scripts that are neither single-signature nor
/// multisignature contracts; those need a node-side verification run.
pub fn calculate(exec_fee_factor: i64, verification_script: &[u8]) -> Option<(i64, usize)> {
    if is_signature_contract(verification_script) {
        let size = get_var_size(SIGNATURE_PUSH_SIZE)
            + SIGNATURE_PUSH_SIZE
            + get_var_size(verification_script.len())
            + verification_script.len();
        let fee = opcode_cost(exec_fee_factor, &[OpCode::PUSHDATA1, OpCode::PUSHDATA1])
            + exec_fee_factor * ECDSA_VERIFY_PRICE;
        return Some((fee, size));
    }
    let (m, keys) = parse_multisig_contract(verification_script)?;
    let n = keys.len();
    let invocation_size = SIGNATURE_PUSH_SIZE * m;
    let size = get_var_size(invocation_size)
        + invocation_size
        + get_var_size(verification_script.len())
        + verification_script.len();
    let fee = multisig_push_cost(exec_fee_factor, m)
        + multisig_push_cost(exec_fee_factor, n)
        + exec_fee_factor * ECDSA_VERIFY_PRICE * n as i64;
    Some((fee, size))
}

/// Cost of pushing `count` signatures or keys plus the count itself.
fn multisig_push_cost(exec_fee_factor: i64, count: usize) -> i64 {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_int(count as i64);
    let count_push = builder
        .to_array()
        .ok()
        .and_then(|script| script.first().copied())
        .and_then(|byte| OpCode::try_from(byte).ok())
        .unwrap_or(OpCode::PUSHINT16);
    opcode_cost(exec_fee_factor, &[OpCode::PUSHDATA1]) * count as i64
        + opcode_cost(exec_fee_factor, &[count_push])
}
