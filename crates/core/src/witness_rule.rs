// Copyright (C) 2015-2025 The Neo Project.
//
// witness_rule.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witness rules attached to signers with the `WitnessRules` scope.

use crate::ecpoint::ECPoint;
use crate::error::{CoreError, CoreResult};
use crate::io::{get_var_size, BinaryWriter, Serializable};
use crate::uint160::{UInt160, UINT160_SIZE};
use serde::{Deserialize, Serialize};

pub const MAX_CONDITION_SUBITEMS: usize = 16;
pub const MAX_CONDITION_NESTING: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WitnessRuleAction {
    Deny = 0,
    Allow = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WitnessCondition {
    Boolean { expression: bool },
    Not { expression: Box<WitnessCondition> },
    And { expressions: Vec<WitnessCondition> },
    Or { expressions: Vec<WitnessCondition> },
    ScriptHash { hash: UInt160 },
    Group { group: ECPoint },
    CalledByEntry,
    CalledByContract { hash: UInt160 },
    CalledByGroup { group: ECPoint },
}

impl WitnessCondition {
    pub fn type_byte(&self) -> u8 {
        match self {
            WitnessCondition::Boolean { .. } => 0x00,
            WitnessCondition::Not { .. } => 0x01,
            WitnessCondition::And { .. } => 0x02,
            WitnessCondition::Or { .. } => 0x03,
            WitnessCondition::ScriptHash { .. } => 0x18,
            WitnessCondition::Group { .. } => 0x19,
            WitnessCondition::CalledByEntry => 0x20,
            WitnessCondition::CalledByContract { .. } => 0x28,
            WitnessCondition::CalledByGroup { .. } => 0x29,
        }
    }

    /// Checks the nesting depth and composite sizes the node enforces.
    pub fn validate(&self) -> CoreResult<()> {
        self.validate_at(MAX_CONDITION_NESTING)
    }

    fn validate_at(&self, depth: usize) -> CoreResult<()> {
        match self {
            WitnessCondition::Not { expression } => {
                if depth == 0 {
                    return Err(CoreError::invalid_data("witness condition nested too deeply"));
                }
                expression.validate_at(depth - 1)
            }
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                if depth == 0 {
                    return Err(CoreError::invalid_data("witness condition nested too deeply"));
                }
                if expressions.is_empty() || expressions.len() > MAX_CONDITION_SUBITEMS {
                    return Err(CoreError::invalid_data(format!(
                        "composite witness condition has {} subitems",
                        expressions.len()
                    )));
                }
                expressions.iter().try_for_each(|e| e.validate_at(depth - 1))
            }
            _ => Ok(()),
        }
    }
}

impl Serializable for WitnessCondition {
    fn size(&self) -> usize {
        1 + match self {
            WitnessCondition::Boolean { .. } => 1,
            WitnessCondition::Not { expression } => expression.size(),
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                get_var_size(expressions.len())
                    + expressions.iter().map(Serializable::size).sum::<usize>()
            }
            WitnessCondition::ScriptHash { .. } | WitnessCondition::CalledByContract { .. } => {
                UINT160_SIZE
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                group.as_bytes().len()
            }
            WitnessCondition::CalledByEntry => 0,
        }
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.type_byte());
        match self {
            WitnessCondition::Boolean { expression } => writer.write_bool(*expression),
            WitnessCondition::Not { expression } => {
                Serializable::serialize(expression.as_ref(), writer)
            }
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                writer.write_serializable_list(expressions)
            }
            WitnessCondition::ScriptHash { hash } | WitnessCondition::CalledByContract { hash } => {
                writer.write_bytes(hash.as_bytes())
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                writer.write_bytes(group.as_bytes())
            }
            WitnessCondition::CalledByEntry => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRule {
    pub action: WitnessRuleAction,
    pub condition: WitnessCondition,
}

impl Serializable for WitnessRule {
    fn size(&self) -> usize {
        1 + self.condition.size()
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.action as u8);
        Serializable::serialize(&self.condition, writer);
    }
}
