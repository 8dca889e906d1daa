//! Interop service descriptors used by client-side scripts.

use sha2::{Digest, Sha256};

/// Fixed cost of one ECDSA signature verification, before the exec-fee factor.
pub const ECDSA_VERIFY_PRICE: i64 = 1 << 15;

/// A named system call and its base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteropDescriptor {
    pub name: &'static str,
    pub price: i64,
}

impl InteropDescriptor {
    /// The 4-byte identifier emitted after `SYSCALL`: the first four bytes of
    /// SHA-256 over the ASCII name, read little-endian.
    pub fn hash(&self) -> u32 {
        interop_hash(self.name)
    }
}

pub fn interop_hash(name: &str) -> u32 {
    let digest = Sha256::digest(name.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

pub const SYSTEM_CONTRACT_CALL: InteropDescriptor = InteropDescriptor {
    name: "System.Contract.Call",
    price: 1 << 15,
};

pub const SYSTEM_ITERATOR_NEXT: InteropDescriptor = InteropDescriptor {
    name: "System.Iterator.Next",
    price: 1 << 15,
};

pub const SYSTEM_ITERATOR_VALUE: InteropDescriptor = InteropDescriptor {
    name: "System.Iterator.Value",
    price: 1 << 4,
};

pub const SYSTEM_CRYPTO_CHECKSIG: InteropDescriptor = InteropDescriptor {
    name: "System.Crypto.CheckSig",
    price: ECDSA_VERIFY_PRICE,
};

/// Priced per key at execution time, hence zero here.
pub const SYSTEM_CRYPTO_CHECKMULTISIG: InteropDescriptor = InteropDescriptor {
    name: "System.Crypto.CheckMultisig",
    price: 0,
};

pub const SYSTEM_RUNTIME_CHECKWITNESS: InteropDescriptor = InteropDescriptor {
    name: "System.Runtime.CheckWitness",
    price: 1 << 10,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_hashes() {
        assert_eq!(SYSTEM_CRYPTO_CHECKSIG.hash(), 0x27b3e756);
        assert_eq!(SYSTEM_CRYPTO_CHECKMULTISIG.hash(), 0x3adcd09e);
        assert_eq!(SYSTEM_CONTRACT_CALL.hash(), 0x525b7d62);
    }
}
