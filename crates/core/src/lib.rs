// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # Neo Core
//!
//! Wire-level types of the Neo N3 protocol that a client builds and signs:
//! hashes and addresses, signers with their scopes and rules, witnesses,
//! transaction attributes, transactions, P2P notary requests, contract call
//! scripts and the closed-form fee of standard witnesses.

pub mod ecpoint;
pub mod error;
pub mod fee;
pub mod hashing;
pub mod io;
pub mod notary_request;
pub mod signer;
pub mod smart_contract;
pub mod transaction;
pub mod uint160;
pub mod uint256;
pub mod witness;
pub mod witness_rule;
pub mod witness_scope;

pub use ecpoint::ECPoint;
pub use error::{CoreError, CoreResult};
pub use io::{BinaryWriter, Serializable};
pub use notary_request::P2PNotaryRequest;
pub use signer::Signer;
pub use smart_contract::{ContractParameter, ContractParameterType};
pub use transaction::{Transaction, TransactionAttribute, TransactionAttributeType};
pub use uint160::{UInt160, ADDRESS_VERSION};
pub use uint256::UInt256;
pub use witness::Witness;
pub use witness_rule::{WitnessCondition, WitnessRule, WitnessRuleAction};
pub use witness_scope::WitnessScope;
