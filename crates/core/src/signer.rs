// Copyright (C) 2015-2025 The Neo Project.
//
// signer.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction signers.

use crate::ecpoint::ECPoint;
use crate::error::{CoreError, CoreResult};
use crate::io::{get_var_list_size, BinaryWriter, Serializable};
use crate::uint160::{UInt160, UINT160_SIZE};
use crate::witness_rule::WitnessRule;
use crate::witness_scope::WitnessScope;
use serde::{Deserialize, Serialize};

pub const MAX_SUBITEMS: usize = 16;

/// An account whose witness a transaction carries, and where that witness is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub account: UInt160,
    pub scopes: WitnessScope,
    #[serde(rename = "allowedcontracts", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_contracts: Vec<UInt160>,
    #[serde(rename = "allowedgroups", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_groups: Vec<ECPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<WitnessRule>,
}

impl Signer {
    pub fn new(account: UInt160, scopes: WitnessScope) -> Self {
        Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn called_by_entry(account: UInt160) -> Self {
        Self::new(account, WitnessScope::CalledByEntry)
    }

    pub fn with_allowed_contracts(mut self, contracts: Vec<UInt160>) -> Self {
        self.scopes = self.scopes | WitnessScope::CustomContracts;
        self.allowed_contracts = contracts;
        self
    }

    pub fn with_allowed_groups(mut self, groups: Vec<ECPoint>) -> Self {
        self.scopes = self.scopes | WitnessScope::CustomGroups;
        self.allowed_groups = groups;
        self
    }

    pub fn with_rules(mut self, rules: Vec<WitnessRule>) -> Self {
        self.scopes = self.scopes | WitnessScope::WitnessRules;
        self.rules = rules;
        self
    }

    /// Checks that the scope flags and the attached lists agree.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.scopes.is_valid() {
            return Err(CoreError::invalid_data(format!(
                "signer {} has invalid scope {}",
                self.account, self.scopes
            )));
        }
        let lists = [
            (WitnessScope::CustomContracts, self.allowed_contracts.len(), "allowed contracts"),
            (WitnessScope::CustomGroups, self.allowed_groups.len(), "allowed groups"),
            (WitnessScope::WitnessRules, self.rules.len(), "rules"),
        ];
        for (flag, len, what) in lists {
            if !self.scopes.has_flag(flag) && len != 0 {
                return Err(CoreError::invalid_data(format!(
                    "signer {} lists {what} without the {flag} scope",
                    self.account
                )));
            }
            if len > MAX_SUBITEMS {
                return Err(CoreError::invalid_data(format!(
                    "signer {} has {len} {what}, at most {MAX_SUBITEMS} allowed",
                    self.account
                )));
            }
        }
        self.rules.iter().try_for_each(|rule| rule.condition.validate())
    }
}

impl Serializable for Signer {
    fn size(&self) -> usize {
        let mut size = UINT160_SIZE + 1;
        if self.scopes.has_flag(WitnessScope::CustomContracts) {
            size += get_var_list_size(&self.allowed_contracts);
        }
        if self.scopes.has_flag(WitnessScope::CustomGroups) {
            size += get_var_list_size(&self.allowed_groups);
        }
        if self.scopes.has_flag(WitnessScope::WitnessRules) {
            size += get_var_list_size(&self.rules);
        }
        size
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.account.as_bytes());
        writer.write_u8(self.scopes.to_byte());
        if self.scopes.has_flag(WitnessScope::CustomContracts) {
            writer.write_serializable_list(&self.allowed_contracts);
        }
        if self.scopes.has_flag(WitnessScope::CustomGroups) {
            writer.write_serializable_list(&self.allowed_groups);
        }
        if self.scopes.has_flag(WitnessScope::WitnessRules) {
            writer.write_serializable_list(&self.rules);
        }
    }
}
