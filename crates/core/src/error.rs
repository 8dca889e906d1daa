// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for the core crate.

use neo_vm::VmError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("invalid data: {message}")]
    InvalidData { message: String },

    #[error("script error: {0}")]
    Vm(#[from] VmError),
}

impl CoreError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        CoreError::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        CoreError::InvalidData {
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
