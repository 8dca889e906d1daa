//! Script builder for the Neo Virtual Machine.
//!
//! Straight-line code is appended as bytes. Jumps to labels are kept symbolic
//! until [`ScriptBuilder::to_array`], which lays the script out, widens every
//! jump whose final offset does not fit in an `i8`, and patches the offsets.

use crate::call_flags::CallFlags;
use crate::error::{VmError, VmResult};
use crate::interop::{interop_hash, InteropDescriptor, SYSTEM_CONTRACT_CALL};
use crate::op_code::OpCode;
use num_bigint::BigInt;

/// A jump target inside a [`ScriptBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(usize);

#[derive(Debug, Clone, Copy)]
struct LabelMark {
    raw_position: usize,
    jumps_before: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingJump {
    raw_position: usize,
    opcode: OpCode,
    label: Label,
}

/// Helps construct VM scripts programmatically.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: Vec<u8>,
    labels: Vec<Option<LabelMark>>,
    jumps: Vec<PendingJump>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a single raw byte.
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    pub fn emit_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    pub fn emit_instruction(&mut self, opcode: OpCode, operand: &[u8]) -> &mut Self {
        self.emit_opcode(opcode);
        self.emit_raw(operand)
    }

    /// Pushes a byte string, always through a `PUSHDATA` instruction.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= 0xFF {
            self.emit_instruction(OpCode::PUSHDATA1, &[len as u8]);
        } else if len <= 0xFFFF {
            self.emit_instruction(OpCode::PUSHDATA2, &(len as u16).to_le_bytes());
        } else {
            self.emit_instruction(OpCode::PUSHDATA4, &(len as u32).to_le_bytes());
        }
        self.emit_raw(data)
    }

    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        if let Some(op) = OpCode::for_small_int(value) {
            return self.emit_opcode(op);
        }
        let bytes = BigInt::from(value).to_signed_bytes_le();
        self.emit_push_int_bytes(&bytes)
    }

    /// Pushes an arbitrary precision integer using the smallest `PUSHINT*` form.
    pub fn emit_push_bigint(&mut self, value: &BigInt) -> VmResult<&mut Self> {
        if let Some(op) = i64::try_from(value).ok().and_then(OpCode::for_small_int) {
            return Ok(self.emit_opcode(op));
        }
        let bytes = value.to_signed_bytes_le();
        if bytes.len() > 32 {
            return Err(VmError::invalid_operation_msg(
                "integer exceeds PUSHINT256 capacity",
            ));
        }
        Ok(self.emit_push_int_bytes(&bytes))
    }

    fn emit_push_int_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        let (opcode, width) = match bytes.len() {
            0..=1 => (OpCode::PUSHINT8, 1),
            2 => (OpCode::PUSHINT16, 2),
            3..=4 => (OpCode::PUSHINT32, 4),
            5..=8 => (OpCode::PUSHINT64, 8),
            9..=16 => (OpCode::PUSHINT128, 16),
            _ => (OpCode::PUSHINT256, 32),
        };
        let negative = bytes.last().is_some_and(|b| b & 0x80 != 0);
        let mut padded = bytes.to_vec();
        padded.resize(width, if negative { 0xFF } else { 0x00 });
        self.emit_instruction(opcode, &padded)
    }

    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit_opcode(if value { OpCode::PUSHT } else { OpCode::PUSHF })
    }

    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push(value.as_bytes())
    }

    pub fn emit_push_null(&mut self) -> &mut Self {
        self.emit_opcode(OpCode::PUSHNULL)
    }

    /// Packs the `count` items on top of the stack into an array.
    pub fn emit_pack(&mut self, count: usize) -> &mut Self {
        if count == 0 {
            return self.emit_opcode(OpCode::NEWARRAY0);
        }
        self.emit_push_int(count as i64);
        self.emit_opcode(OpCode::PACK)
    }

    /// Emits `System.Contract.Call` for arguments already packed on the stack.
    pub fn emit_contract_call(
        &mut self,
        script_hash: &[u8],
        method: &str,
        flags: CallFlags,
    ) -> &mut Self {
        self.emit_push_int(flags.0 as i64);
        self.emit_push_string(method);
        self.emit_push(script_hash);
        self.emit_syscall(&SYSTEM_CONTRACT_CALL)
    }

    pub fn emit_syscall(&mut self, descriptor: &InteropDescriptor) -> &mut Self {
        self.emit_syscall_hash(descriptor.hash())
    }

    pub fn emit_syscall_by_name(&mut self, api: &str) -> VmResult<&mut Self> {
        if api.len() > 252 {
            return Err(VmError::invalid_operation_msg(format!(
                "syscall name too long: {} bytes",
                api.len()
            )));
        }
        Ok(self.emit_syscall_hash(interop_hash(api)))
    }

    pub fn emit_syscall_hash(&mut self, hash: u32) -> &mut Self {
        self.emit_instruction(OpCode::SYSCALL, &hash.to_le_bytes())
    }

    /// Emits a jump with a known offset, upgrading to the long form when needed.
    pub fn emit_jump(&mut self, opcode: OpCode, offset: i32) -> VmResult<&mut Self> {
        if !opcode.is_jump() && opcode != OpCode::CALL && opcode != OpCode::CALL_L {
            return Err(VmError::invalid_operation_msg(format!(
                "invalid jump operation: {opcode}"
            )));
        }
        match (opcode.long_form(), i8::try_from(offset)) {
            (Some(_), Ok(short)) => Ok(self.emit_instruction(opcode, &[short as u8])),
            (Some(long), Err(_)) => Ok(self.emit_instruction(long, &offset.to_le_bytes())),
            (None, _) => Ok(self.emit_instruction(opcode, &offset.to_le_bytes())),
        }
    }

    pub fn new_label(&mut self) -> Label {
        self.labels.push(None);
        Label(self.labels.len() - 1)
    }

    /// Binds `label` to the current end of the script.
    pub fn mark_label(&mut self, label: Label) -> VmResult<&mut Self> {
        let slot = self
            .labels
            .get_mut(label.0)
            .ok_or(VmError::UnmarkedLabel(label.0))?;
        if slot.is_some() {
            return Err(VmError::DuplicateLabel(label.0));
        }
        *slot = Some(LabelMark {
            raw_position: self.script.len(),
            jumps_before: self.jumps.len(),
        });
        Ok(self)
    }

    /// Emits a jump to `label`, resolved when the script is finished.
    /// `opcode` must be the short form of a jump or `CALL`.
    pub fn emit_jump_to(&mut self, opcode: OpCode, label: Label) -> VmResult<&mut Self> {
        let is_short = (opcode.is_jump() || opcode == OpCode::CALL) && opcode.long_form().is_some();
        if !is_short {
            return Err(VmError::invalid_operation_msg(format!(
                "{opcode} cannot target a label"
            )));
        }
        self.jumps.push(PendingJump {
            raw_position: self.script.len(),
            opcode,
            label,
        });
        Ok(self)
    }

    /// Returns the finished script with every label jump resolved.
    pub fn to_array(&self) -> VmResult<Vec<u8>> {
        if self.jumps.is_empty() {
            return Ok(self.script.clone());
        }
        let marks = self
            .jumps
            .iter()
            .map(|jump| {
                self.labels
                    .get(jump.label.0)
                    .copied()
                    .flatten()
                    .ok_or(VmError::UnmarkedLabel(jump.label.0))
            })
            .collect::<VmResult<Vec<_>>>()?;

        // Widening only ever grows the script, so this settles.
        let mut long = vec![false; self.jumps.len()];
        let offsets = loop {
            let starts = self.jump_starts(&long);
            let offsets: Vec<i64> = self
                .jumps
                .iter()
                .zip(&marks)
                .enumerate()
                .map(|(i, (_, mark))| {
                    let target = mark.raw_position + starts.shift_before(mark.jumps_before);
                    target as i64 - starts.at(i) as i64
                })
                .collect();
            let mut changed = false;
            for (i, offset) in offsets.iter().enumerate() {
                if !long[i] && i8::try_from(*offset).is_err() {
                    long[i] = true;
                    changed = true;
                }
            }
            if !changed {
                break offsets;
            }
        };

        let mut out = Vec::with_capacity(self.script.len() + self.jumps.len() * 5);
        let mut copied = 0;
        for (i, jump) in self.jumps.iter().enumerate() {
            out.extend_from_slice(&self.script[copied..jump.raw_position]);
            copied = jump.raw_position;
            if long[i] {
                let opcode = jump
                    .opcode
                    .long_form()
                    .ok_or_else(|| VmError::invalid_operation_msg("missing long jump form"))?;
                out.push(opcode as u8);
                out.extend_from_slice(&(offsets[i] as i32).to_le_bytes());
            } else {
                out.push(jump.opcode as u8);
                out.push(offsets[i] as i8 as u8);
            }
        }
        out.extend_from_slice(&self.script[copied..]);
        Ok(out)
    }

    fn jump_starts(&self, long: &[bool]) -> JumpLayout {
        let sizes: Vec<usize> = long.iter().map(|l| if *l { 5 } else { 2 }).collect();
        let mut prefix = Vec::with_capacity(sizes.len() + 1);
        prefix.push(0);
        for size in &sizes {
            prefix.push(prefix[prefix.len() - 1] + size);
        }
        JumpLayout {
            raw: self.jumps.iter().map(|j| j.raw_position).collect(),
            prefix,
        }
    }

    /// Length of the script emitted so far, counting label jumps in short form.
    pub fn len(&self) -> usize {
        self.script.len() + self.jumps.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty() && self.jumps.is_empty()
    }
}

struct JumpLayout {
    raw: Vec<usize>,
    prefix: Vec<usize>,
}

impl JumpLayout {
    fn shift_before(&self, jumps: usize) -> usize {
        self.prefix[jumps]
    }

    fn at(&self, jump: usize) -> usize {
        self.raw[jump] + self.prefix[jump]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interop::SYSTEM_CRYPTO_CHECKSIG;

    #[test]
    fn test_emit_push_int() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(-1);
        builder.emit_push_int(0);
        builder.emit_push_int(10);
        builder.emit_push_int(100);
        builder.emit_push_int(-100);
        builder.emit_push_int(1000);
        builder.emit_push_int(1 << 40);

        let script = builder.to_array().unwrap();
        assert_eq!(
            script,
            vec![
                OpCode::PUSHM1 as u8,
                OpCode::PUSH0 as u8,
                OpCode::PUSH10 as u8,
                OpCode::PUSHINT8 as u8,
                100,
                OpCode::PUSHINT8 as u8,
                0x9c,
                OpCode::PUSHINT16 as u8,
                0xe8,
                0x03,
                OpCode::PUSHINT64 as u8,
                0,
                0,
                0,
                0,
                0,
                1,
                0,
                0,
            ]
        );
    }

    #[test]
    fn test_emit_push_bigint_pads_sign() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_bigint(&BigInt::from(-70000)).unwrap();
        let script = builder.to_array().unwrap();
        assert_eq!(script[0], OpCode::PUSHINT32 as u8);
        assert_eq!(i32::from_le_bytes([script[1], script[2], script[3], script[4]]), -70000);

        let huge = BigInt::from(1) << 300;
        assert!(ScriptBuilder::new().emit_push_bigint(&huge).is_err());
    }

    #[test]
    fn test_emit_push_data() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push(&[1, 2, 3]);
        builder.emit_push(&[0; 300]);
        let script = builder.to_array().unwrap();
        assert_eq!(&script[..5], &[OpCode::PUSHDATA1 as u8, 3, 1, 2, 3]);
        assert_eq!(&script[5..8], &[OpCode::PUSHDATA2 as u8, 0x2c, 0x01]);
        assert_eq!(script.len(), 5 + 3 + 300);
    }

    #[test]
    fn test_emit_pack() {
        let mut builder = ScriptBuilder::new();
        builder.emit_pack(0).emit_pack(2);
        assert_eq!(
            builder.to_array().unwrap(),
            vec![OpCode::NEWARRAY0 as u8, OpCode::PUSH2 as u8, OpCode::PACK as u8]
        );
    }

    #[test]
    fn test_emit_jump() {
        let mut builder = ScriptBuilder::new();
        builder.emit_jump(OpCode::JMP, 10).unwrap();
        builder.emit_jump(OpCode::JMPIF, 1000).unwrap();
        assert_eq!(
            builder.to_array().unwrap(),
            vec![OpCode::JMP as u8, 10, OpCode::JMPIF_L as u8, 0xe8, 0x03, 0, 0]
        );
        assert!(ScriptBuilder::new().emit_jump(OpCode::ADD, 1).is_err());
    }

    #[test]
    fn test_emit_syscall() {
        let mut builder = ScriptBuilder::new();
        builder.emit_syscall(&SYSTEM_CRYPTO_CHECKSIG);
        assert_eq!(
            builder.to_array().unwrap(),
            vec![OpCode::SYSCALL as u8, 0x56, 0xe7, 0xb3, 0x27]
        );
    }

    #[test]
    fn test_backward_and_forward_labels() {
        let mut builder = ScriptBuilder::new();
        let start = builder.new_label();
        let end = builder.new_label();
        builder.mark_label(start).unwrap();
        builder.emit_opcode(OpCode::NOP);
        builder.emit_jump_to(OpCode::JMPIFNOT, end).unwrap();
        builder.emit_opcode(OpCode::NOP);
        builder.emit_jump_to(OpCode::JMP, start).unwrap();
        builder.mark_label(end).unwrap();
        builder.emit_opcode(OpCode::RET);

        assert_eq!(
            builder.to_array().unwrap(),
            vec![
                OpCode::NOP as u8,
                OpCode::JMPIFNOT as u8,
                5,
                OpCode::NOP as u8,
                OpCode::JMP as u8,
                (-4i8) as u8,
                OpCode::RET as u8,
            ]
        );
    }

    #[test]
    fn test_far_label_uses_long_form() {
        let mut builder = ScriptBuilder::new();
        let end = builder.new_label();
        builder.emit_jump_to(OpCode::JMP, end).unwrap();
        builder.emit_raw(&[OpCode::NOP as u8; 200]);
        builder.mark_label(end).unwrap();

        let script = builder.to_array().unwrap();
        assert_eq!(script[0], OpCode::JMP_L as u8);
        assert_eq!(i32::from_le_bytes([script[1], script[2], script[3], script[4]]), 205);
        assert_eq!(script.len(), 205);
    }

    #[test]
    fn test_unmarked_label_is_an_error() {
        let mut builder = ScriptBuilder::new();
        let label = builder.new_label();
        builder.emit_jump_to(OpCode::JMP, label).unwrap();
        assert_eq!(builder.to_array(), Err(VmError::UnmarkedLabel(0)));
        assert!(builder.mark_label(label).is_ok());
        assert_eq!(builder.mark_label(label).err(), Some(VmError::DuplicateLabel(0)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn decode_int_push(script: &[u8]) -> i64 {
            let op = OpCode::try_from(script[0]).unwrap();
            if (OpCode::PUSHM1..=OpCode::PUSH16).contains(&op) {
                return script[0] as i64 - OpCode::PUSH0 as i64;
            }
            assert_eq!(script.len(), 1 + op.operand_size().size());
            i64::try_from(BigInt::from_signed_bytes_le(&script[1..])).unwrap()
        }

        proptest! {
            #[test]
            fn pushed_integers_use_minimal_fixed_width(value in any::<i64>()) {
                let mut builder = ScriptBuilder::new();
                builder.emit_push_int(value);
                let script = builder.to_array().unwrap();
                prop_assert_eq!(decode_int_push(&script), value);
            }
        }
    }
}
