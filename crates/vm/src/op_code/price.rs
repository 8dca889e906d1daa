//! Base execution prices of the instruction set, in units of the exec-fee factor.

use super::OpCode;

impl OpCode {
    /// Base price charged for executing this instruction once.
    pub fn price(self) -> i64 {
        use OpCode::*;
        match self {
            PUSHINT8 | PUSHINT16 | PUSHINT32 | PUSHINT64 | PUSHT | PUSHF | PUSHNULL | PUSHM1
            | PUSH0 | PUSH1 | PUSH2 | PUSH3 | PUSH4 | PUSH5 | PUSH6 | PUSH7 | PUSH8 | PUSH9
            | PUSH10 | PUSH11 | PUSH12 | PUSH13 | PUSH14 | PUSH15 | PUSH16 | NOP | ASSERT
            | ASSERTMSG => 1 << 0,
            PUSHINT128 | PUSHINT256 | PUSHA | TRY | TRY_L | ENDTRY | ENDTRY_L | ENDFINALLY
            | INVERT | SIGN | ABS | NEGATE | INC | DEC | NOT | NZ | SIZE => 1 << 2,
            PUSHDATA1 | AND | OR | XOR | ADD | SUB | MUL | DIV | MOD | SHL | SHR | BOOLAND
            | BOOLOR | NUMEQUAL | NUMNOTEQUAL | LT | LE | GT | GE | MIN | MAX | WITHIN
            | NEWMAP => 1 << 3,
            PUSHDATA2 => 1 << 9,
            PUSHDATA4 => 1 << 12,
            JMP | JMP_L | JMPIF | JMPIF_L | JMPIFNOT | JMPIFNOT_L | JMPEQ | JMPEQ_L | JMPNE
            | JMPNE_L | JMPGT | JMPGT_L | JMPGE | JMPGE_L | JMPLT | JMPLT_L | JMPLE | JMPLE_L
            | DEPTH | DROP | NIP | DUP | OVER | PICK | TUCK | SWAP | ROT | REVERSE3
            | REVERSE4 | ISNULL | ISTYPE => 1 << 1,
            LDSFLD0 | LDSFLD1 | LDSFLD2 | LDSFLD3 | LDSFLD4 | LDSFLD5 | LDSFLD6 | LDSFLD
            | STSFLD0 | STSFLD1 | STSFLD2 | STSFLD3 | STSFLD4 | STSFLD5 | STSFLD6 | STSFLD
            | LDLOC0 | LDLOC1 | LDLOC2 | LDLOC3 | LDLOC4 | LDLOC5 | LDLOC6 | LDLOC | STLOC0
            | STLOC1 | STLOC2 | STLOC3 | STLOC4 | STLOC5 | STLOC6 | STLOC | LDARG0 | LDARG1
            | LDARG2 | LDARG3 | LDARG4 | LDARG5 | LDARG6 | LDARG | STARG0 | STARG1 | STARG2
            | STARG3 | STARG4 | STARG5 | STARG6 | STARG => 1 << 1,
            CALL | CALL_L | CALLA | THROW | NEWARRAY | NEWARRAY_T | NEWSTRUCT => 1 << 9,
            CALLT => 1 << 15,
            ABORT | ABORTMSG | RET | SYSCALL => 0,
            XDROP | CLEAR | ROLL | REVERSEN | INITSSLOT | NEWARRAY0 | NEWSTRUCT0 | KEYS
            | REMOVE | CLEARITEMS | POPITEM => 1 << 4,
            INITSLOT | POW | SQRT | HASKEY | PICKITEM => 1 << 6,
            EQUAL | NOTEQUAL | MODMUL => 1 << 5,
            NEWBUFFER => 1 << 8,
            MEMCPY | CAT | SUBSTR | LEFT | RIGHT | MODPOW | PACKMAP | PACKSTRUCT | PACK
            | UNPACK => 1 << 11,
            VALUES | APPEND | SETITEM | REVERSEITEMS | CONVERT => 1 << 13,
        }
    }
}
