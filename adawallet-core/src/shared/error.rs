//! Error handling for the wallet core
//!
//! This module defines the error types used throughout the wallet core.

use thiserror::Error;

/// Wallet error type
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    /// Generic wrapped failure from the derivation/crypto layer. Not
    /// individually recoverable; surfaced to a generic error dialog.
    #[error("Cardano error: {0}")]
    Cardano(String),

    /// Authenticated decryption failed. Wrong password and corrupted
    /// ciphertext are deliberately indistinguishable.
    #[error("Wrong password")]
    WrongPassword,

    /// Biometric/hardware key invalidated since setup. Unrecoverable for
    /// the session; forces wallet lock.
    #[error("System authentication disabled")]
    SystemAuthDisabled,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalletError {
    /// Create a Cardano (crypto layer) error
    pub fn cardano(message: impl Into<String>) -> Self {
        Self::Cardano(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error is recoverable by the user re-confirming.
    /// Only submission-level network failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// Standard library error conversions
impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", err))
    }
}

impl From<hex::FromHexError> for WalletError {
    fn from(err: hex::FromHexError) -> Self {
        Self::cardano(format!("Hex decoding error: {}", err))
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("JSON error: {}", err))
    }
}

impl From<tokio::task::JoinError> for WalletError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task join error: {}", err))
    }
}

// Cryptographic error conversions
impl From<bs58::decode::Error> for WalletError {
    fn from(err: bs58::decode::Error) -> Self {
        Self::cardano(format!("Base58 decoding error: {}", err))
    }
}

impl From<hmac::digest::InvalidLength> for WalletError {
    fn from(err: hmac::digest::InvalidLength) -> Self {
        Self::cardano(format!("MAC key error: {}", err))
    }
}
