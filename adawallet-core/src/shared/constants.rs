//! Constants for the wallet core
//!
//! This module contains all constants used throughout the wallet core.

// Key material sizes
pub const MASTER_KEY_SIZE: usize = 32;
pub const ACCOUNT_KEY_SIZE: usize = 32;
pub const KEK_SIZE: usize = 32;

// Encrypted master key blob layout: hex(salt || nonce || ciphertext).
// The byte layout is load-bearing: previously created wallets must keep
// decrypting after upgrades.
pub const SALT_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
pub const MIN_BLOB_SIZE: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

// Key-encryption-key derivation (PBKDF2-HMAC-SHA512). The iteration count
// matches the PasswordProtect parameter used by already-deployed wallets.
pub const PBKDF2_ITERATIONS: u32 = 19_162;

// Address encoding
pub const ADDRESS_VERSION_BYTE: u8 = 0x53;
pub const ADDRESS_PAYLOAD_SIZE: usize = 28;
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

// Protocol magic selects the network for account derivation
pub const PROTOCOL_MAGIC_MAINNET: u32 = 764_824_073;
pub const PROTOCOL_MAGIC_TESTNET: u32 = 1_097_911_063;

// Mnemonic constants (strength in bits of entropy)
pub const DEFAULT_MNEMONIC_STRENGTH: usize = 160;
pub const SUPPORTED_MNEMONIC_STRENGTHS: &[usize] = &[128, 160, 192, 224, 256];

// Password constants
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

// Secret store key names
pub const MASTER_PASSWORD_KEY_NAME: &str = "MASTER_PASSWORD";
pub const WALLET_META_KEY_NAME: &str = "WALLET_META";

// Wallet constants
pub const WALLET_NAME_MAX_LENGTH: usize = 50;
pub const WALLET_NAME_MIN_LENGTH: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_layout_sizes() {
        // A blob must at minimum carry salt, nonce, and the AEAD tag
        assert_eq!(MIN_BLOB_SIZE, 60);
    }

    #[test]
    fn test_supported_strengths_include_default() {
        assert!(SUPPORTED_MNEMONIC_STRENGTHS.contains(&DEFAULT_MNEMONIC_STRENGTH));
    }
}
