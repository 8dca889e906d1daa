//! Call flags restricting what a called contract may do.

use crate::error::VmError;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Flags that control what operations a contract can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallFlags(pub u8);

impl CallFlags {
    pub const NONE: Self = Self(0);
    pub const READ_STATES: Self = Self(0x01);
    pub const WRITE_STATES: Self = Self(0x02);
    pub const ALLOW_CALL: Self = Self(0x04);
    pub const ALLOW_NOTIFY: Self = Self(0x08);
    pub const STATES: Self = Self(Self::READ_STATES.0 | Self::WRITE_STATES.0);
    pub const READ_ONLY: Self = Self(Self::READ_STATES.0 | Self::ALLOW_CALL.0);
    pub const ALL: Self = Self(Self::STATES.0 | Self::ALLOW_CALL.0 | Self::ALLOW_NOTIFY.0);

    const NAMED: [(&'static str, CallFlags); 8] = [
        ("All", Self::ALL),
        ("ReadOnly", Self::READ_ONLY),
        ("States", Self::STATES),
        ("ReadStates", Self::READ_STATES),
        ("WriteStates", Self::WRITE_STATES),
        ("AllowCall", Self::ALLOW_CALL),
        ("AllowNotify", Self::ALLOW_NOTIFY),
        ("None", Self::NONE),
    ];

    pub fn has_flag(&self, flag: Self) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Creates CallFlags from bits, returning None if undefined bits are set.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits <= 0xFF && (bits & !Self::ALL.0 as u32) == 0 {
            Some(Self(bits as u8))
        } else {
            None
        }
    }
}

impl BitOr for CallFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for CallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = Self::NAMED.iter().find(|(_, flag)| flag == self) {
            return f.write_str(name);
        }
        let mut rest = self.0;
        let mut parts = Vec::new();
        for (name, flag) in &Self::NAMED[3..7] {
            if rest & flag.0 == flag.0 {
                parts.push(*name);
                rest &= !flag.0;
            }
        }
        f.write_str(&parts.join(", "))
    }
}

impl FromStr for CallFlags {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .try_fold(CallFlags::NONE, |acc, part| {
                Self::NAMED
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(part))
                    .map(|(_, flag)| acc | *flag)
                    .ok_or_else(|| VmError::parse("call flags", s))
            })
    }
}
