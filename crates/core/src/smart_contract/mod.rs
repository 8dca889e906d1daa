// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Contract-facing helpers: call scripts, parameters and standard verification scripts.

pub mod contract;
mod contract_parameter;

pub use contract_parameter::{ContractParameter, ContractParameterType};

use crate::error::CoreResult;
use crate::uint160::UInt160;
use neo_vm::{CallFlags, OpCode, ScriptBuilder};

/// Emits a `System.Contract.Call` of `method` on `contract` with packed `params`.
pub fn emit_app_call(
    builder: &mut ScriptBuilder,
    contract: &UInt160,
    method: &str,
    flags: CallFlags,
    params: &[ContractParameter],
) -> CoreResult<()> {
    for param in params.iter().rev() {
        param.emit(builder)?;
    }
    builder.emit_pack(params.len());
    builder.emit_contract_call(contract.as_bytes(), method, flags);
    Ok(())
}

/// A complete script calling one method with `CallFlags::ALL`.
pub fn create_call_script(
    contract: &UInt160,
    method: &str,
    params: &[ContractParameter],
) -> CoreResult<Vec<u8>> {
    let mut builder = ScriptBuilder::new();
    emit_app_call(&mut builder, contract, method, CallFlags::ALL, params)?;
    Ok(builder.to_array()?)
}

/// Like [`create_call_script`], but aborts unless the call returns true.
pub fn create_asserted_call_script(
    contract: &UInt160,
    method: &str,
    params: &[ContractParameter],
) -> CoreResult<Vec<u8>> {
    let mut builder = ScriptBuilder::new();
    emit_app_call(&mut builder, contract, method, CallFlags::ALL, params)?;
    builder.emit_opcode(OpCode::ASSERT);
    Ok(builder.to_array()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_vm::interop::SYSTEM_CONTRACT_CALL;

    #[test]
    fn test_call_script_layout() {
        let hash = UInt160::from([9u8; 20]);
        let script = create_call_script(&hash, "symbol", &[]).unwrap();
        let mut expected = vec![OpCode::NEWARRAY0 as u8, OpCode::PUSH15 as u8];
        expected.extend_from_slice(&[OpCode::PUSHDATA1 as u8, 6]);
        expected.extend_from_slice(b"symbol");
        expected.extend_from_slice(&[OpCode::PUSHDATA1 as u8, 20]);
        expected.extend_from_slice(&[9u8; 20]);
        expected.push(OpCode::SYSCALL as u8);
        expected.extend_from_slice(&SYSTEM_CONTRACT_CALL.hash().to_le_bytes());
        assert_eq!(script, expected);

        let asserted = create_asserted_call_script(&hash, "symbol", &[]).unwrap();
        assert_eq!(asserted.last(), Some(&(OpCode::ASSERT as u8)));
    }
}
