//! VM state as reported by test invocations and application logs.

use crate::error::VmError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Indicates the status of the VM.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VMState {
    /// Execution is in progress or has not yet begun.
    #[default]
    NONE = 0,

    /// Execution completed successfully.
    HALT = 1 << 0,

    /// Execution ended with an exception that cannot be caught.
    FAULT = 1 << 1,

    /// A breakpoint is currently being hit.
    BREAK = 1 << 2,
}

impl VMState {
    #[inline]
    pub fn contains(self, flag: VMState) -> bool {
        (self as u8 & flag as u8) != 0
    }

    #[inline]
    pub fn is_halt(self) -> bool {
        self.contains(VMState::HALT)
    }

    #[inline]
    pub fn is_fault(self) -> bool {
        self.contains(VMState::FAULT)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VMState::NONE => "NONE",
            VMState::HALT => "HALT",
            VMState::FAULT => "FAULT",
            VMState::BREAK => "BREAK",
        }
    }
}

impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Nodes are not consistent about casing, so parsing ignores it.
impl FromStr for VMState {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(VMState::NONE),
            "HALT" => Ok(VMState::HALT),
            "FAULT" => Ok(VMState::FAULT),
            "BREAK" => Ok(VMState::BREAK),
            _ => Err(VmError::parse("VM state", s)),
        }
    }
}

impl Serialize for VMState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VMState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
