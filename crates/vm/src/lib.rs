//! # Neo Virtual Machine primitives
//!
//! The parts of the Neo N3 virtual machine a client needs without executing
//! anything: the instruction set with its base prices, VM states reported by
//! test invocations, call flags, interop descriptors, and a [`ScriptBuilder`]
//! that resolves label jumps in a second pass.
//!
//! ## Example
//!
//! ```rust
//! use neo_vm::{OpCode, ScriptBuilder};
//!
//! # fn example() -> neo_vm::VmResult<()> {
//! let mut builder = ScriptBuilder::new();
//! let done = builder.new_label();
//! builder.emit_push_bool(true);
//! builder.emit_jump_to(OpCode::JMPIF, done)?;
//! builder.emit_opcode(OpCode::ABORT);
//! builder.mark_label(done)?;
//! builder.emit_opcode(OpCode::RET);
//! assert_eq!(builder.to_array()?.len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod call_flags;
pub mod error;
pub mod interop;
pub mod op_code;
pub mod script_builder;
pub mod vm_state;

pub use call_flags::CallFlags;
pub use error::{VmError, VmResult};
pub use interop::{InteropDescriptor, ECDSA_VERIFY_PRICE};
pub use op_code::{OpCode, OperandSize};
pub use script_builder::{Label, ScriptBuilder};
pub use vm_state::VMState;
