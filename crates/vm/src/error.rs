//! Error types for script construction and VM primitives.

use thiserror::Error;

/// Errors raised while building or inspecting scripts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("invalid opcode 0x{0:02x}")]
    InvalidOpCode(u8),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("label {0} is not marked")]
    UnmarkedLabel(usize),

    #[error("label {0} is marked twice")]
    DuplicateLabel(usize),

    #[error("cannot parse {kind}: {value}")]
    Parse { kind: &'static str, value: String },
}

impl VmError {
    pub fn invalid_operation_msg(msg: impl Into<String>) -> Self {
        VmError::InvalidOperation(msg.into())
    }

    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        VmError::Parse {
            kind,
            value: value.into(),
        }
    }
}

pub type VmResult<T> = Result<T, VmError>;
