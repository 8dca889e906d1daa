// Copyright (C) 2015-2025 The Neo Project.
//
// witness_scope.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witness scopes restricting where a signer's witness is valid.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Scope flags of a transaction signer.
///
/// `Global` cannot be combined with any other flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WitnessScope(u8);

#[allow(non_upper_case_globals)]
impl WitnessScope {
    /// Only sign the transaction, no contract is witnessed.
    pub const None: WitnessScope = WitnessScope(0x00);

    /// The calling contract must be the entry contract.
    pub const CalledByEntry: WitnessScope = WitnessScope(0x01);

    pub const CustomContracts: WitnessScope = WitnessScope(0x10);

    pub const CustomGroups: WitnessScope = WitnessScope(0x20);

    /// The current context must satisfy the signer's rules.
    pub const WitnessRules: WitnessScope = WitnessScope(0x40);

    /// Valid in every context.
    pub const Global: WitnessScope = WitnessScope(0x80);
}

const NAMED_SCOPES: [(&str, WitnessScope); 5] = [
    ("CalledByEntry", WitnessScope::CalledByEntry),
    ("CustomContracts", WitnessScope::CustomContracts),
    ("CustomGroups", WitnessScope::CustomGroups),
    ("WitnessRules", WitnessScope::WitnessRules),
    ("Global", WitnessScope::Global),
];

impl WitnessScope {
    pub fn has_flag(self, flag: WitnessScope) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn from_byte(value: u8) -> CoreResult<Self> {
        let scope = WitnessScope(value);
        if scope.is_valid() {
            Ok(scope)
        } else {
            Err(CoreError::invalid_data(format!("invalid witness scope 0x{value:02x}")))
        }
    }

    pub fn to_byte(self) -> u8 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        let known = NAMED_SCOPES.iter().fold(0u8, |acc, (_, s)| acc | s.0);
        if self.0 & !known != 0 {
            return false;
        }
        !(self.has_flag(WitnessScope::Global) && self.0 != WitnessScope::Global.0)
    }
}

impl BitOr for WitnessScope {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        WitnessScope(self.0 | rhs.0)
    }
}

impl fmt::Display for WitnessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("None");
        }
        let names: Vec<&str> = NAMED_SCOPES
            .iter()
            .filter(|(_, scope)| self.has_flag(*scope))
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join(", "))
    }
}

impl FromStr for WitnessScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scope = WitnessScope::None;
        for part in s.split(',').map(str::trim) {
            if part == "None" {
                continue;
            }
            let (_, flag) = NAMED_SCOPES
                .iter()
                .find(|(name, _)| *name == part)
                .ok_or_else(|| CoreError::invalid_format(format!("unknown witness scope {part}")))?;
            scope = scope | *flag;
        }
        if !scope.is_valid() {
            return Err(CoreError::invalid_format(format!("invalid witness scope {s}")));
        }
        Ok(scope)
    }
}

impl Serialize for WitnessScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WitnessScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let scope = WitnessScope::CalledByEntry | WitnessScope::CustomContracts;
        assert_eq!(scope.to_string(), "CalledByEntry, CustomContracts");
        assert_eq!("CalledByEntry, CustomContracts".parse::<WitnessScope>().unwrap(), scope);
        assert_eq!("CalledByEntry,CustomContracts".parse::<WitnessScope>().unwrap(), scope);
        assert_eq!(WitnessScope::None.to_string(), "None");
        assert_eq!("None".parse::<WitnessScope>().unwrap(), WitnessScope::None);
    }

    #[test]
    fn test_global_is_exclusive() {
        assert!(WitnessScope::Global.is_valid());
        assert!(!(WitnessScope::Global | WitnessScope::CalledByEntry).is_valid());
        assert!("Global, CalledByEntry".parse::<WitnessScope>().is_err());
        assert!(WitnessScope::from_byte(0x02).is_err());
        assert_eq!(WitnessScope::from_byte(0x11).unwrap().to_byte(), 0x11);
    }
}
