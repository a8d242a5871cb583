use serde::{Deserialize, Serialize};

use crate::shared::constants::{PROTOCOL_MAGIC_MAINNET, PROTOCOL_MAGIC_TESTNET};

// Basic types for wallet operations
pub type Address = String;
pub type Amount = String;
pub type EncryptedKeyBlob = String;

/// Network selection; the protocol magic feeds account derivation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn protocol_magic(&self) -> u32 {
        match self {
            Network::Mainnet => PROTOCOL_MAGIC_MAINNET,
            Network::Testnet => PROTOCOL_MAGIC_TESTNET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
        }
    }
}

/// Derivation branch: receiving addresses vs change addresses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AddressType {
    External,
    Internal,
}

impl AddressType {
    /// Branch discriminant mixed into the derivation input
    pub fn branch(&self) -> u8 {
        match self {
            AddressType::External => 0,
            AddressType::Internal => 1,
        }
    }
}

/// Per-wallet authorization path for transaction confirmation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuthorizationMode {
    /// Biometric-backed quick confirmation
    EasyConfirmation,
    /// Spending password entered on every confirmation
    PasswordRequired,
}

/// Kind of item held by the secret store. Biometric-backed and PIN-backed
/// items require an auth secret on retrieval; the master-password item does
/// not (the password goes to KeyCrypto instead).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum KeyType {
    MasterPassword,
    Biometrics,
    SystemPin,
}

impl KeyType {
    pub fn requires_auth_secret(&self) -> bool {
        matches!(self, KeyType::Biometrics | KeyType::SystemPin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::MasterPassword => "MASTER_PASSWORD",
            KeyType::Biometrics => "BIOMETRICS",
            KeyType::SystemPin => "SYSTEM_PIN",
        }
    }
}

/// Transaction awaiting signature: owned by the confirmation flow until
/// handed, together with a decrypted key, to the submitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDraft {
    pub receiver: Address,
    pub amount: Amount,
    pub fee: Amount,
    /// Serialized unsigned transaction payload
    pub payload: Vec<u8>,
}

impl TransactionDraft {
    pub fn new(receiver: Address, amount: Amount, fee: Amount, payload: Vec<u8>) -> Self {
        Self {
            receiver,
            amount,
            fee,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_magic_selection() {
        assert_ne!(
            Network::Mainnet.protocol_magic(),
            Network::Testnet.protocol_magic()
        );
    }

    #[test]
    fn test_branch_discriminants_differ() {
        assert_ne!(
            AddressType::External.branch(),
            AddressType::Internal.branch()
        );
    }

    #[test]
    fn test_auth_secret_requirements() {
        assert!(!KeyType::MasterPassword.requires_auth_secret());
        assert!(KeyType::Biometrics.requires_auth_secret());
        assert!(KeyType::SystemPin.requires_auth_secret());
    }
}
