//! Neo VM instruction set.
//!
//! Byte values follow the Neo N3 instruction table. Short jump forms are even,
//! their long (`_L`) counterparts are the next odd value.

mod operand_size;
mod price;

pub use operand_size::OperandSize;

use crate::error::VmError;
use std::fmt;

#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpCode {
    // Constants
    PUSHINT8 = 0x00,
    PUSHINT16 = 0x01,
    PUSHINT32 = 0x02,
    PUSHINT64 = 0x03,
    PUSHINT128 = 0x04,
    PUSHINT256 = 0x05,
    PUSHT = 0x08,
    PUSHF = 0x09,
    PUSHA = 0x0A,
    PUSHNULL = 0x0B,
    PUSHDATA1 = 0x0C,
    PUSHDATA2 = 0x0D,
    PUSHDATA4 = 0x0E,
    PUSHM1 = 0x0F,
    PUSH0 = 0x10,
    PUSH1 = 0x11,
    PUSH2 = 0x12,
    PUSH3 = 0x13,
    PUSH4 = 0x14,
    PUSH5 = 0x15,
    PUSH6 = 0x16,
    PUSH7 = 0x17,
    PUSH8 = 0x18,
    PUSH9 = 0x19,
    PUSH10 = 0x1A,
    PUSH11 = 0x1B,
    PUSH12 = 0x1C,
    PUSH13 = 0x1D,
    PUSH14 = 0x1E,
    PUSH15 = 0x1F,
    PUSH16 = 0x20,

    // Flow control
    NOP = 0x21,
    JMP = 0x22,
    JMP_L = 0x23,
    JMPIF = 0x24,
    JMPIF_L = 0x25,
    JMPIFNOT = 0x26,
    JMPIFNOT_L = 0x27,
    JMPEQ = 0x28,
    JMPEQ_L = 0x29,
    JMPNE = 0x2A,
    JMPNE_L = 0x2B,
    JMPGT = 0x2C,
    JMPGT_L = 0x2D,
    JMPGE = 0x2E,
    JMPGE_L = 0x2F,
    JMPLT = 0x30,
    JMPLT_L = 0x31,
    JMPLE = 0x32,
    JMPLE_L = 0x33,
    CALL = 0x34,
    CALL_L = 0x35,
    CALLA = 0x36,
    CALLT = 0x37,
    ABORT = 0x38,
    ASSERT = 0x39,
    THROW = 0x3A,
    TRY = 0x3B,
    TRY_L = 0x3C,
    ENDTRY = 0x3D,
    ENDTRY_L = 0x3E,
    ENDFINALLY = 0x3F,
    RET = 0x40,
    SYSCALL = 0x41,

    // Stack
    DEPTH = 0x43,
    DROP = 0x45,
    NIP = 0x46,
    XDROP = 0x48,
    CLEAR = 0x49,
    DUP = 0x4A,
    OVER = 0x4B,
    PICK = 0x4D,
    TUCK = 0x4E,
    SWAP = 0x50,
    ROT = 0x51,
    ROLL = 0x52,
    REVERSE3 = 0x53,
    REVERSE4 = 0x54,
    REVERSEN = 0x55,

    // Slots
    INITSSLOT = 0x56,
    INITSLOT = 0x57,
    LDSFLD0 = 0x58,
    LDSFLD1 = 0x59,
    LDSFLD2 = 0x5A,
    LDSFLD3 = 0x5B,
    LDSFLD4 = 0x5C,
    LDSFLD5 = 0x5D,
    LDSFLD6 = 0x5E,
    LDSFLD = 0x5F,
    STSFLD0 = 0x60,
    STSFLD1 = 0x61,
    STSFLD2 = 0x62,
    STSFLD3 = 0x63,
    STSFLD4 = 0x64,
    STSFLD5 = 0x65,
    STSFLD6 = 0x66,
    STSFLD = 0x67,
    LDLOC0 = 0x68,
    LDLOC1 = 0x69,
    LDLOC2 = 0x6A,
    LDLOC3 = 0x6B,
    LDLOC4 = 0x6C,
    LDLOC5 = 0x6D,
    LDLOC6 = 0x6E,
    LDLOC = 0x6F,
    STLOC0 = 0x70,
    STLOC1 = 0x71,
    STLOC2 = 0x72,
    STLOC3 = 0x73,
    STLOC4 = 0x74,
    STLOC5 = 0x75,
    STLOC6 = 0x76,
    STLOC = 0x77,
    LDARG0 = 0x78,
    LDARG1 = 0x79,
    LDARG2 = 0x7A,
    LDARG3 = 0x7B,
    LDARG4 = 0x7C,
    LDARG5 = 0x7D,
    LDARG6 = 0x7E,
    LDARG = 0x7F,
    STARG0 = 0x80,
    STARG1 = 0x81,
    STARG2 = 0x82,
    STARG3 = 0x83,
    STARG4 = 0x84,
    STARG5 = 0x85,
    STARG6 = 0x86,
    STARG = 0x87,

    // Splice
    NEWBUFFER = 0x88,
    MEMCPY = 0x89,
    CAT = 0x8B,
    SUBSTR = 0x8C,
    LEFT = 0x8D,
    RIGHT = 0x8E,

    // Bitwise logic
    INVERT = 0x90,
    AND = 0x91,
    OR = 0x92,
    XOR = 0x93,
    EQUAL = 0x97,
    NOTEQUAL = 0x98,

    // Arithmetic
    SIGN = 0x99,
    ABS = 0x9A,
    NEGATE = 0x9B,
    INC = 0x9C,
    DEC = 0x9D,
    ADD = 0x9E,
    SUB = 0x9F,
    MUL = 0xA0,
    DIV = 0xA1,
    MOD = 0xA2,
    POW = 0xA3,
    SQRT = 0xA4,
    MODMUL = 0xA5,
    MODPOW = 0xA6,
    SHL = 0xA8,
    SHR = 0xA9,
    NOT = 0xAA,
    BOOLAND = 0xAB,
    BOOLOR = 0xAC,
    NZ = 0xB1,
    NUMEQUAL = 0xB3,
    NUMNOTEQUAL = 0xB4,
    LT = 0xB5,
    LE = 0xB6,
    GT = 0xB7,
    GE = 0xB8,
    MIN = 0xB9,
    MAX = 0xBA,
    WITHIN = 0xBB,

    // Compound types
    PACKMAP = 0xBE,
    PACKSTRUCT = 0xBF,
    PACK = 0xC0,
    UNPACK = 0xC1,
    NEWARRAY0 = 0xC2,
    NEWARRAY = 0xC3,
    NEWARRAY_T = 0xC4,
    NEWSTRUCT0 = 0xC5,
    NEWSTRUCT = 0xC6,
    NEWMAP = 0xC8,
    SIZE = 0xCA,
    HASKEY = 0xCB,
    KEYS = 0xCC,
    VALUES = 0xCD,
    PICKITEM = 0xCE,
    APPEND = 0xCF,
    SETITEM = 0xD0,
    REVERSEITEMS = 0xD1,
    REMOVE = 0xD2,
    CLEARITEMS = 0xD3,
    POPITEM = 0xD4,

    // Types
    ISNULL = 0xD8,
    ISTYPE = 0xD9,
    CONVERT = 0xDB,

    // Extensions
    ABORTMSG = 0xE0,
    ASSERTMSG = 0xE1,
}

const ALL_OPCODES: &[OpCode] = &[
    OpCode::PUSHINT8, OpCode::PUSHINT16, OpCode::PUSHINT32, OpCode::PUSHINT64,
    OpCode::PUSHINT128, OpCode::PUSHINT256, OpCode::PUSHT, OpCode::PUSHF, OpCode::PUSHA,
    OpCode::PUSHNULL, OpCode::PUSHDATA1, OpCode::PUSHDATA2, OpCode::PUSHDATA4, OpCode::PUSHM1,
    OpCode::PUSH0, OpCode::PUSH1, OpCode::PUSH2, OpCode::PUSH3, OpCode::PUSH4, OpCode::PUSH5,
    OpCode::PUSH6, OpCode::PUSH7, OpCode::PUSH8, OpCode::PUSH9, OpCode::PUSH10, OpCode::PUSH11,
    OpCode::PUSH12, OpCode::PUSH13, OpCode::PUSH14, OpCode::PUSH15, OpCode::PUSH16,
    OpCode::NOP, OpCode::JMP, OpCode::JMP_L, OpCode::JMPIF, OpCode::JMPIF_L, OpCode::JMPIFNOT,
    OpCode::JMPIFNOT_L, OpCode::JMPEQ, OpCode::JMPEQ_L, OpCode::JMPNE, OpCode::JMPNE_L,
    OpCode::JMPGT, OpCode::JMPGT_L, OpCode::JMPGE, OpCode::JMPGE_L, OpCode::JMPLT,
    OpCode::JMPLT_L, OpCode::JMPLE, OpCode::JMPLE_L, OpCode::CALL, OpCode::CALL_L,
    OpCode::CALLA, OpCode::CALLT, OpCode::ABORT, OpCode::ASSERT, OpCode::THROW, OpCode::TRY,
    OpCode::TRY_L, OpCode::ENDTRY, OpCode::ENDTRY_L, OpCode::ENDFINALLY, OpCode::RET,
    OpCode::SYSCALL, OpCode::DEPTH, OpCode::DROP, OpCode::NIP, OpCode::XDROP, OpCode::CLEAR,
    OpCode::DUP, OpCode::OVER, OpCode::PICK, OpCode::TUCK, OpCode::SWAP, OpCode::ROT,
    OpCode::ROLL, OpCode::REVERSE3, OpCode::REVERSE4, OpCode::REVERSEN, OpCode::INITSSLOT,
    OpCode::INITSLOT, OpCode::LDSFLD0, OpCode::LDSFLD1, OpCode::LDSFLD2, OpCode::LDSFLD3,
    OpCode::LDSFLD4, OpCode::LDSFLD5, OpCode::LDSFLD6, OpCode::LDSFLD, OpCode::STSFLD0,
    OpCode::STSFLD1, OpCode::STSFLD2, OpCode::STSFLD3, OpCode::STSFLD4, OpCode::STSFLD5,
    OpCode::STSFLD6, OpCode::STSFLD, OpCode::LDLOC0, OpCode::LDLOC1, OpCode::LDLOC2,
    OpCode::LDLOC3, OpCode::LDLOC4, OpCode::LDLOC5, OpCode::LDLOC6, OpCode::LDLOC,
    OpCode::STLOC0, OpCode::STLOC1, OpCode::STLOC2, OpCode::STLOC3, OpCode::STLOC4,
    OpCode::STLOC5, OpCode::STLOC6, OpCode::STLOC, OpCode::LDARG0, OpCode::LDARG1,
    OpCode::LDARG2, OpCode::LDARG3, OpCode::LDARG4, OpCode::LDARG5, OpCode::LDARG6,
    OpCode::LDARG, OpCode::STARG0, OpCode::STARG1, OpCode::STARG2, OpCode::STARG3,
    OpCode::STARG4, OpCode::STARG5, OpCode::STARG6, OpCode::STARG, OpCode::NEWBUFFER,
    OpCode::MEMCPY, OpCode::CAT, OpCode::SUBSTR, OpCode::LEFT, OpCode::RIGHT, OpCode::INVERT,
    OpCode::AND, OpCode::OR, OpCode::XOR, OpCode::EQUAL, OpCode::NOTEQUAL, OpCode::SIGN,
    OpCode::ABS, OpCode::NEGATE, OpCode::INC, OpCode::DEC, OpCode::ADD, OpCode::SUB,
    OpCode::MUL, OpCode::DIV, OpCode::MOD, OpCode::POW, OpCode::SQRT, OpCode::MODMUL,
    OpCode::MODPOW, OpCode::SHL, OpCode::SHR, OpCode::NOT, OpCode::BOOLAND, OpCode::BOOLOR,
    OpCode::NZ, OpCode::NUMEQUAL, OpCode::NUMNOTEQUAL, OpCode::LT, OpCode::LE, OpCode::GT,
    OpCode::GE, OpCode::MIN, OpCode::MAX, OpCode::WITHIN, OpCode::PACKMAP, OpCode::PACKSTRUCT,
    OpCode::PACK, OpCode::UNPACK, OpCode::NEWARRAY0, OpCode::NEWARRAY, OpCode::NEWARRAY_T,
    OpCode::NEWSTRUCT0, OpCode::NEWSTRUCT, OpCode::NEWMAP, OpCode::SIZE, OpCode::HASKEY,
    OpCode::KEYS, OpCode::VALUES, OpCode::PICKITEM, OpCode::APPEND, OpCode::SETITEM,
    OpCode::REVERSEITEMS, OpCode::REMOVE, OpCode::CLEARITEMS, OpCode::POPITEM, OpCode::ISNULL,
    OpCode::ISTYPE, OpCode::CONVERT, OpCode::ABORTMSG, OpCode::ASSERTMSG,
];

impl OpCode {
    /// Every defined instruction, in byte order.
    pub fn all() -> &'static [OpCode] {
        ALL_OPCODES
    }

    /// Returns true for the conditional and unconditional jump family, short or long.
    pub fn is_jump(self) -> bool {
        (OpCode::JMP as u8..=OpCode::JMPLE_L as u8).contains(&(self as u8))
    }

    /// Returns the 4-byte-offset form of a short jump, call or try.
    pub fn long_form(self) -> Option<OpCode> {
        let value = self as u8;
        match self {
            OpCode::CALL | OpCode::TRY | OpCode::ENDTRY => OpCode::try_from(value + 1).ok(),
            op if op.is_jump() && value % 2 == 0 => OpCode::try_from(value + 1).ok(),
            _ => None,
        }
    }

    /// Returns the `PUSH0..PUSH16` / `PUSHM1` opcode for a small constant.
    pub fn for_small_int(value: i64) -> Option<OpCode> {
        match value {
            -1 => Some(OpCode::PUSHM1),
            0..=16 => OpCode::try_from(OpCode::PUSH0 as u8 + value as u8).ok(),
            _ => None,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = VmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .binary_search_by_key(&value, |op| *op as u8)
            .map(|idx| ALL_OPCODES[idx])
            .map_err(|_| VmError::InvalidOpCode(value))
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_round_trips() {
        for pair in ALL_OPCODES.windows(2) {
            assert!((pair[0] as u8) < (pair[1] as u8), "{:?} out of order", pair[1]);
        }
        for op in ALL_OPCODES {
            assert_eq!(OpCode::try_from(*op as u8).unwrap(), *op);
        }
    }

    #[test]
    fn undefined_bytes_are_rejected() {
        assert!(matches!(OpCode::try_from(0x06), Err(VmError::InvalidOpCode(0x06))));
        assert!(OpCode::try_from(0xFF).is_err());
    }

    #[test]
    fn long_forms() {
        assert_eq!(OpCode::JMP.long_form(), Some(OpCode::JMP_L));
        assert_eq!(OpCode::JMPIFNOT.long_form(), Some(OpCode::JMPIFNOT_L));
        assert_eq!(OpCode::CALL.long_form(), Some(OpCode::CALL_L));
        assert_eq!(OpCode::JMP_L.long_form(), None);
        assert_eq!(OpCode::ADD.long_form(), None);
    }

    #[test]
    fn small_ints() {
        assert_eq!(OpCode::for_small_int(-1), Some(OpCode::PUSHM1));
        assert_eq!(OpCode::for_small_int(2), Some(OpCode::PUSH2));
        assert_eq!(OpCode::for_small_int(16), Some(OpCode::PUSH16));
        assert_eq!(OpCode::for_small_int(17), None);
    }
}
