//! Operand size information for Neo VM opcodes.

use super::OpCode;

/// Describes the operand that follows an opcode in a script.
///
/// An operand is either fixed-size, or a length prefix of `size_prefix`
/// bytes followed by that many bytes of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSize {
    size: usize,
    size_prefix: usize,
}

impl OperandSize {
    pub const fn fixed(size: usize) -> Self {
        Self { size, size_prefix: 0 }
    }

    pub const fn prefix(size_prefix: usize) -> Self {
        Self { size: 0, size_prefix }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn size_prefix(&self) -> usize {
        self.size_prefix
    }
}

impl OpCode {
    /// Operand layout for this instruction.
    pub fn operand_size(self) -> OperandSize {
        use OpCode::*;
        match self {
            PUSHINT8 => OperandSize::fixed(1),
            PUSHINT16 => OperandSize::fixed(2),
            PUSHINT32 => OperandSize::fixed(4),
            PUSHINT64 => OperandSize::fixed(8),
            PUSHINT128 => OperandSize::fixed(16),
            PUSHINT256 => OperandSize::fixed(32),
            PUSHA => OperandSize::fixed(4),
            PUSHDATA1 => OperandSize::prefix(1),
            PUSHDATA2 => OperandSize::prefix(2),
            PUSHDATA4 => OperandSize::prefix(4),
            JMP | JMPIF | JMPIFNOT | JMPEQ | JMPNE | JMPGT | JMPGE | JMPLT | JMPLE | CALL
            | ENDTRY => OperandSize::fixed(1),
            JMP_L | JMPIF_L | JMPIFNOT_L | JMPEQ_L | JMPNE_L | JMPGT_L | JMPGE_L | JMPLT_L
            | JMPLE_L | CALL_L | ENDTRY_L => OperandSize::fixed(4),
            TRY => OperandSize::fixed(2),
            TRY_L => OperandSize::fixed(8),
            CALLT => OperandSize::fixed(2),
            SYSCALL => OperandSize::fixed(4),
            INITSSLOT | LDSFLD | STSFLD | LDLOC | STLOC | LDARG | STARG | NEWARRAY_T
            | ISTYPE | CONVERT => OperandSize::fixed(1),
            INITSLOT => OperandSize::fixed(2),
            _ => OperandSize::fixed(0),
        }
    }
}
