// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_validator.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Validator and committee listings.

use super::common::i64_string;
use neo_core::ECPoint;
use serde::{Deserialize, Serialize};

/// An entry of `getnextblockvalidators`; `votes` arrives as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcValidator {
    #[serde(rename = "publickey")]
    pub public_key: ECPoint,
    #[serde(with = "i64_string")]
    pub votes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_votes_either_form() {
        let key = "03009b7540e10f2562e5fd8fac9eaec25166a58b26e412348ff5a86927bfac22a2";
        let from_number: RpcValidator =
            serde_json::from_value(json!({"publickey": key, "votes": 0})).unwrap();
        let from_string: RpcValidator =
            serde_json::from_value(json!({"publickey": key, "votes": "0"})).unwrap();
        assert_eq!(from_number, from_string);
    }
}
